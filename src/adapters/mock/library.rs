//! Scripted library API for testing.
//!
//! Each endpoint has its own response queue. Responses are consumed in
//! order; the last one stays in place and keeps being returned, so a test
//! that only cares about a steady state pushes a single response.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::api::models::{
    Book, Loan, LoginRequest, Member, Profile, ProfileUpdate, RegisterRequest, TokenResponse,
};
use crate::api::ApiError;
use crate::traits::LibraryApi;

/// A call made against the mock, for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Login { username: String },
    Register { username: String },
    AvailableBooks,
    Borrow { isbn: String },
    MyLoans,
    RenewLoan(i64),
    ReturnLoan(i64),
    MyProfile,
    UpdateProfile(ProfileUpdate),
    ListMembers,
    Member(i64),
    SearchMembers(String),
}

#[derive(Debug)]
struct Queue<T> {
    responses: VecDeque<Result<T, ApiError>>,
}

impl<T: Clone> Queue<T> {
    fn new() -> Self {
        Self {
            responses: VecDeque::new(),
        }
    }

    fn push(&mut self, response: Result<T, ApiError>) {
        self.responses.push_back(response);
    }

    fn next(&mut self, endpoint: &str) -> Result<T, ApiError> {
        if self.responses.len() > 1 {
            if let Some(response) = self.responses.pop_front() {
                return response;
            }
        }
        self.responses.front().cloned().unwrap_or_else(|| {
            Err(ApiError::network(format!("no mock response configured for {}", endpoint)))
        })
    }
}

#[derive(Debug)]
struct Script {
    login: Queue<TokenResponse>,
    register: Queue<TokenResponse>,
    books: Queue<Vec<Book>>,
    borrow: Queue<()>,
    loans: Queue<Vec<Loan>>,
    renew: Queue<()>,
    return_loan: Queue<()>,
    profile: Queue<Profile>,
    update_profile: Queue<()>,
    members: Queue<Vec<Member>>,
    member: Queue<Member>,
    search: Queue<Vec<Member>>,
}

impl Script {
    fn new() -> Self {
        Self {
            login: Queue::new(),
            register: Queue::new(),
            books: Queue::new(),
            borrow: Queue::new(),
            loans: Queue::new(),
            renew: Queue::new(),
            return_loan: Queue::new(),
            profile: Queue::new(),
            update_profile: Queue::new(),
            members: Queue::new(),
            member: Queue::new(),
            search: Queue::new(),
        }
    }
}

/// Mock implementation of [`LibraryApi`].
///
/// Clones share the same script and call log.
///
/// # Example
///
/// ```ignore
/// let api = MockLibraryApi::new();
/// api.push_books(Ok(vec![dune()]));
/// api.push_borrow(Err(ApiError::from_response(400, r#"{"message":"Not available"}"#)));
///
/// let mut view = BooksViewModel::new(Arc::new(api.clone()));
/// view.load().await;
/// view.borrow("ISBN-404").await;
/// assert_eq!(api.calls().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct MockLibraryApi {
    script: Arc<Mutex<Script>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockLibraryApi {
    pub fn new() -> Self {
        Self {
            script: Arc::new(Mutex::new(Script::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_login(&self, response: Result<TokenResponse, ApiError>) {
        self.script.lock().unwrap().login.push(response);
    }

    pub fn push_register(&self, response: Result<TokenResponse, ApiError>) {
        self.script.lock().unwrap().register.push(response);
    }

    pub fn push_books(&self, response: Result<Vec<Book>, ApiError>) {
        self.script.lock().unwrap().books.push(response);
    }

    pub fn push_borrow(&self, response: Result<(), ApiError>) {
        self.script.lock().unwrap().borrow.push(response);
    }

    pub fn push_loans(&self, response: Result<Vec<Loan>, ApiError>) {
        self.script.lock().unwrap().loans.push(response);
    }

    pub fn push_renew(&self, response: Result<(), ApiError>) {
        self.script.lock().unwrap().renew.push(response);
    }

    pub fn push_return(&self, response: Result<(), ApiError>) {
        self.script.lock().unwrap().return_loan.push(response);
    }

    pub fn push_profile(&self, response: Result<Profile, ApiError>) {
        self.script.lock().unwrap().profile.push(response);
    }

    pub fn push_update_profile(&self, response: Result<(), ApiError>) {
        self.script.lock().unwrap().update_profile.push(response);
    }

    pub fn push_members(&self, response: Result<Vec<Member>, ApiError>) {
        self.script.lock().unwrap().members.push(response);
    }

    pub fn push_member(&self, response: Result<Member, ApiError>) {
        self.script.lock().unwrap().member.push(response);
    }

    pub fn push_search(&self, response: Result<Vec<Member>, ApiError>) {
        self.script.lock().unwrap().search.push(response);
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &RecordedCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockLibraryApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LibraryApi for MockLibraryApi {
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError> {
        self.record(RecordedCall::Login {
            username: request.username.clone(),
        });
        self.script.lock().unwrap().login.next("login")
    }

    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError> {
        self.record(RecordedCall::Register {
            username: request.username.clone(),
        });
        self.script.lock().unwrap().register.next("register")
    }

    async fn available_books(&self) -> Result<Vec<Book>, ApiError> {
        self.record(RecordedCall::AvailableBooks);
        self.script.lock().unwrap().books.next("available_books")
    }

    async fn borrow(&self, isbn: &str) -> Result<(), ApiError> {
        self.record(RecordedCall::Borrow {
            isbn: isbn.to_string(),
        });
        self.script.lock().unwrap().borrow.next("borrow")
    }

    async fn my_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.record(RecordedCall::MyLoans);
        self.script.lock().unwrap().loans.next("my_loans")
    }

    async fn renew_loan(&self, loan_id: i64) -> Result<(), ApiError> {
        self.record(RecordedCall::RenewLoan(loan_id));
        self.script.lock().unwrap().renew.next("renew_loan")
    }

    async fn return_loan(&self, loan_id: i64) -> Result<(), ApiError> {
        self.record(RecordedCall::ReturnLoan(loan_id));
        self.script.lock().unwrap().return_loan.next("return_loan")
    }

    async fn my_profile(&self) -> Result<Profile, ApiError> {
        self.record(RecordedCall::MyProfile);
        self.script.lock().unwrap().profile.next("my_profile")
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.record(RecordedCall::UpdateProfile(update.clone()));
        self.script.lock().unwrap().update_profile.next("update_profile")
    }

    async fn list_members(&self) -> Result<Vec<Member>, ApiError> {
        self.record(RecordedCall::ListMembers);
        self.script.lock().unwrap().members.next("list_members")
    }

    async fn member(&self, member_id: i64) -> Result<Member, ApiError> {
        self.record(RecordedCall::Member(member_id));
        self.script.lock().unwrap().member.next("member")
    }

    async fn search_members(&self, name: &str) -> Result<Vec<Member>, ApiError> {
        self.record(RecordedCall::SearchMembers(name.to_string()));
        self.script.lock().unwrap().search.next("search_members")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unscripted_endpoint_fails_as_network_error() {
        let api = MockLibraryApi::new();
        let err = api.available_books().await.unwrap_err();
        assert_eq!(err.kind, crate::api::ApiErrorKind::NetworkFailure);
        assert_eq!(api.calls(), vec![RecordedCall::AvailableBooks]);
    }

    #[tokio::test]
    async fn test_last_response_is_sticky() {
        let api = MockLibraryApi::new();
        api.push_borrow(Err(ApiError::from_response(400, "")));
        api.push_borrow(Ok(()));

        assert!(api.borrow("a").await.is_err());
        assert!(api.borrow("b").await.is_ok());
        assert!(api.borrow("c").await.is_ok());
        assert_eq!(api.count(&RecordedCall::Borrow { isbn: "a".to_string() }), 1);
        assert_eq!(api.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let api = MockLibraryApi::new();
        let clone = api.clone();
        clone.push_renew(Ok(()));
        assert!(api.renew_loan(4).await.is_ok());
        assert_eq!(clone.calls(), vec![RecordedCall::RenewLoan(4)]);
        api.clear_calls();
        assert!(clone.calls().is_empty());
    }
}
