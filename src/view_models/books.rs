//! Available-books page: the catalog plus borrow-by-ISBN.

use std::sync::Arc;

use super::state::{MutationOutcome, Notice, ViewError, ViewHandle, ViewState};
use crate::api::models::Book;
use crate::traits::LibraryApi;

pub const LOAD_FAILED: &str = "Failed to load books";
pub const BORROW_FAILED: &str = "Borrow failed";
pub const BORROWED: &str = "Book borrowed";

pub struct BooksViewModel<A: LibraryApi> {
    api: Arc<A>,
    handle: ViewHandle,
    state: ViewState<Vec<Book>>,
    /// Shown next to the borrow form.
    error: Option<ViewError>,
    notice: Option<Notice>,
}

impl<A: LibraryApi> BooksViewModel<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            handle: ViewHandle::new(),
            state: ViewState::Idle,
            error: None,
            notice: None,
        }
    }

    pub fn state(&self) -> &ViewState<Vec<Book>> {
        &self.state
    }

    pub fn books(&self) -> Option<&[Book]> {
        self.state.snapshot().map(Vec::as_slice)
    }

    pub fn error(&self) -> Option<&ViewError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Acknowledge the pending notice.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    pub fn handle(&self) -> ViewHandle {
        self.handle.clone()
    }

    /// Fetch the catalog. A failure discards the previous snapshot.
    pub async fn load(&mut self) {
        if !self.handle.is_active() {
            return;
        }
        self.state = ViewState::Loading;
        let result = self.api.available_books().await;
        if !self.handle.is_active() {
            tracing::debug!("Books view torn down, dropping catalog response");
            return;
        }
        if let Err(e) = &result {
            tracing::warn!("Loading books failed: {}", e);
        }
        self.state = ViewState::settle(result, LOAD_FAILED);
    }

    /// Re-fetch after a failed borrow, keeping the snapshot if this fails too.
    async fn reload_keeping_snapshot(&mut self) {
        match self.api.available_books().await {
            Ok(books) if self.handle.is_active() => self.state = ViewState::Ready(books),
            Ok(_) => {}
            Err(e) => tracing::warn!("Catalog refresh after failed borrow failed: {}", e),
        }
    }

    /// POST /api/loans/borrow?isbn=, then re-fetch the catalog.
    pub async fn borrow(&mut self, isbn: &str) -> MutationOutcome {
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }
        let Some(_in_flight) = self.handle.try_begin() else {
            return MutationOutcome::Busy;
        };

        let result = self.api.borrow(isbn).await;
        if !self.handle.is_active() {
            return MutationOutcome::Ignored;
        }

        match result {
            Ok(()) => {
                tracing::info!("Borrowed {}", isbn);
                self.error = None;
                self.notice = Some(Notice::Success(BORROWED.to_string()));
                self.load().await;
                MutationOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Borrowing {} failed: {}", isbn, e);
                let error = ViewError::from_api(&e, BORROW_FAILED);
                self.error = Some(error.clone());
                self.notice = Some(Notice::Failure(error.message.clone()));
                // Availability may have changed under us.
                if !error.requires_login() {
                    self.reload_keeping_snapshot().await;
                }
                MutationOutcome::Failed(error)
            }
        }
    }
}
