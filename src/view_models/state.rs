//! Building blocks shared by the resource view-models.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::{ApiError, ApiErrorKind};

/// Lifecycle of a server-owned resource on screen.
///
/// `Idle → Loading → {Ready, Failed}`. A failed fetch discards whatever
/// snapshot was displayed before.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(ViewError),
}

impl<T> ViewState<T> {
    /// State after a fetch completed.
    pub fn settle(result: Result<T, ApiError>, failure_message: &str) -> Self {
        match result {
            Ok(snapshot) => ViewState::Ready(snapshot),
            Err(error) => ViewState::Failed(ViewError::from_api(&error, failure_message)),
        }
    }

    pub fn snapshot(&self) -> Option<&T> {
        match self {
            ViewState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ViewError> {
        match self {
            ViewState::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, ViewState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ViewState::Failed(_))
    }
}

/// An API failure converted into something a page can show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

impl ViewError {
    pub fn from_api(error: &ApiError, fallback: &str) -> Self {
        Self {
            kind: error.kind,
            status: error.http_status,
            message: error.user_message(fallback),
        }
    }

    /// The session is missing or no longer accepted. Terminal: the page
    /// should send the user back to login instead of retrying.
    pub fn requires_login(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }
}

/// A message the user has to acknowledge before carrying on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(m) | Notice::Failure(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::Failure(_))
    }
}

/// Result of a mutating action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The server accepted it; the resource was re-fetched.
    Applied,
    /// The server (or the network) refused it; the snapshot was kept.
    Failed(ViewError),
    /// Another mutation on this view was still outstanding; nothing was sent.
    Busy,
    /// The view was torn down before the response arrived; nothing was applied.
    Ignored,
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationOutcome::Applied)
    }
}

/// Shared flags of a view-model.
///
/// Cloned out to the front-end so it can disable submit controls while a
/// mutation is outstanding and mark the view as gone when the user
/// navigates away.
#[derive(Debug, Clone, Default)]
pub struct ViewHandle {
    torn_down: Arc<AtomicBool>,
    in_flight: Arc<AtomicBool>,
}

impl ViewHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the view as torn down. Responses arriving later are dropped.
    pub fn teardown(&self) {
        self.torn_down.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        !self.torn_down.load(Ordering::SeqCst)
    }

    /// Whether a mutation round trip (including its re-fetch) is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the in-flight slot, `None` if it is taken.
    pub(crate) fn try_begin(&self) -> Option<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight {
                flag: Arc::clone(&self.in_flight),
            })
    }
}

/// Releases the in-flight slot when dropped, including when the mutation
/// future itself is dropped mid-flight.
#[derive(Debug)]
pub(crate) struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle() {
        let ready: ViewState<u32> = ViewState::settle(Ok(3), "x");
        assert_eq!(ready.snapshot(), Some(&3));
        assert!(ready.is_ready());

        let failed: ViewState<u32> =
            ViewState::settle(Err(ApiError::network("down")), "Failed to load books");
        assert!(failed.snapshot().is_none());
        assert_eq!(failed.error().unwrap().message, "Failed to load books");
        assert!(failed.is_failed());
    }

    #[test]
    fn test_default_is_idle() {
        let state: ViewState<Vec<u8>> = ViewState::default();
        assert!(state.is_idle());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_view_error_requires_login() {
        let err = ViewError::from_api(&ApiError::from_response(401, ""), "x");
        assert!(err.requires_login());
        assert_eq!(err.status, Some(401));

        let err = ViewError::from_api(&ApiError::from_response(400, ""), "x");
        assert!(!err.requires_login());
    }

    #[test]
    fn test_notice() {
        let notice = Notice::Failure("Renew failed".to_string());
        assert!(notice.is_failure());
        assert_eq!(notice.message(), "Renew failed");
        assert!(!Notice::Success("ok".to_string()).is_failure());
    }

    #[test]
    fn test_in_flight_slot_is_exclusive() {
        let handle = ViewHandle::new();
        let guard = handle.try_begin();
        assert!(guard.is_some());
        assert!(handle.is_busy());
        assert!(handle.try_begin().is_none());

        drop(guard);
        assert!(!handle.is_busy());
        assert!(handle.try_begin().is_some());
    }

    #[test]
    fn test_teardown_is_shared_between_clones() {
        let handle = ViewHandle::new();
        let clone = handle.clone();
        assert!(handle.is_active());
        clone.teardown();
        assert!(!handle.is_active());
    }
}
