//! Library service API trait.
//!
//! View-models and the auth flow talk to the server only through this trait.
//! [`crate::api::ApiClient`] is the production implementation; tests use
//! [`crate::adapters::mock::MockLibraryApi`].

use async_trait::async_trait;

use crate::api::models::{
    Book, Loan, LoginRequest, Member, Profile, ProfileUpdate, RegisterRequest, TokenResponse,
};
use crate::api::ApiError;

/// The REST endpoints consumed by the client.
///
/// Mutating calls return `()`: callers re-fetch the affected resource
/// instead of trusting whatever the mutation answered with.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// POST /api/auth/login
    async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ApiError>;

    /// POST /api/auth/register
    async fn register(&self, request: &RegisterRequest) -> Result<TokenResponse, ApiError>;

    /// GET /api/books/available
    async fn available_books(&self) -> Result<Vec<Book>, ApiError>;

    /// POST /api/loans/borrow?isbn=
    async fn borrow(&self, isbn: &str) -> Result<(), ApiError>;

    /// GET /api/loans/my
    async fn my_loans(&self) -> Result<Vec<Loan>, ApiError>;

    /// POST /api/loans/renew/{loanId}
    async fn renew_loan(&self, loan_id: i64) -> Result<(), ApiError>;

    /// POST /api/loans/return/{loanId}
    async fn return_loan(&self, loan_id: i64) -> Result<(), ApiError>;

    /// GET /api/members/me
    async fn my_profile(&self) -> Result<Profile, ApiError>;

    /// PUT /api/members/me
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError>;

    /// GET /api/members
    async fn list_members(&self) -> Result<Vec<Member>, ApiError>;

    /// GET /api/members/{id}
    async fn member(&self, member_id: i64) -> Result<Member, ApiError>;

    /// GET /api/members/search?name=
    async fn search_members(&self, name: &str) -> Result<Vec<Member>, ApiError>;
}
