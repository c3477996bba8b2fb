//! My-loans page: the member's loans with renew and return actions.

use std::sync::Arc;

use super::state::{MutationOutcome, Notice, ViewError, ViewHandle, ViewState};
use crate::api::models::Loan;
use crate::api::ApiError;
use crate::traits::LibraryApi;

pub const LOAD_FAILED: &str = "Failed to load loans";
pub const RENEW_FAILED: &str = "Renew failed";
pub const RENEWED: &str = "Loan renewed";
pub const RETURN_FAILED: &str = "Return failed";
pub const RETURNED: &str = "Book returned";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoanAction {
    Renew,
    Return,
}

impl LoanAction {
    fn failure_message(self) -> &'static str {
        match self {
            LoanAction::Renew => RENEW_FAILED,
            LoanAction::Return => RETURN_FAILED,
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            LoanAction::Renew => RENEWED,
            LoanAction::Return => RETURNED,
        }
    }
}

pub struct LoansViewModel<A: LibraryApi> {
    api: Arc<A>,
    handle: ViewHandle,
    state: ViewState<Vec<Loan>>,
    error: Option<ViewError>,
    notice: Option<Notice>,
}

impl<A: LibraryApi> LoansViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            handle: ViewHandle::new(),
            state: ViewState::Idle,
            error: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Loan>> {
        &self.state
    }

    pub fn loans(&self) -> Option<&[Loan]> {
        self.state.snapshot().map(Vec::as_slice)
    }

    /// Loans not yet returned.
    pub fn active_loans(&self) -> Vec<&Loan> {
        self.loans()
            .map(|loans| loans.iter().filter(|l| l.is_active()).collect())
            .unwrap_or_default()
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn handle(&self) -> ViewHandle {
        self.handle.clone()
    }

    pub async fn load(&mut self) {
        if !self.handle.is_active() {
            return;
        }
        self.state = ViewState::Loading;
        let result = self.api.my_loans().await;
        if !self.handle.is_active() {
            tracing::debug!("Loans view torn down, dropping response");
            return;
        }
        if let Err(e) = &result {
            tracing::warn!("Loading loans failed: {}", e);
        }
        self.state = ViewState::settle(result, LOAD_FAILED);
    }

    /// POST /api/loans/renew/{id}, then re-fetch.
    pub async fn renew(&mut self, loan_id: i64) -> MutationOutcome {
        self.mutate(LoanAction::Renew, loan_id).await
    }

    /// POST /api/loans/return/{id}, then re-fetch.
    pub async fn return_loan(&mut self, loan_id: i64) -> MutationOutcome {
        self.mutate(LoanAction::Return, loan_id).await
    }

    async fn mutate(&mut self, action: LoanAction, loan_id: i64) -> MutationOutcome {
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }
        let Some(_in_flight) = self.handle.try_begin() else {
            return MutationOutcome::Busy;
        };

        let result: Result<(), ApiError> = match action {
            LoanAction::Renew => self.api.renew_loan(loan_id).await,
            LoanAction::Return => self.api.return_loan(loan_id).await,
        };
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!("{:?} of loan {} accepted", action, loan_id);
                self.error = None;
                self.notice = Some(Notice::Success(action.success_message().to_string()));
                self.load().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("{:?} of loan {} failed: {}", action, loan_id, e);
                let error = ViewError::from_api(&e, action.failure_message());
                self.error = Some(error.clone());
                self.notice = Some(Notice::Failure(error.message.clone()));
                MutationOutcome::Failed(error)
            }
        }
    }
}
