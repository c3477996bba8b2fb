//! Page-level view-models.
//!
//! Each one owns a server snapshot and follows the same cycle: fetch,
//! display, mutate, re-fetch. Nothing is patched locally after a mutation.
//!
//! - [`BooksViewModel`] - available books and borrow by ISBN
//! - [`LoansViewModel`] - the member's loans, renew and return
//! - [`ProfileViewModel`] - profile details and the edit form
//! - [`MembersViewModel`] - admin member directory

pub mod books;
pub mod loans;
pub mod members;
pub mod profile;
pub mod state;

pub use books::BooksViewModel;
pub use loans::LoansViewModel;
pub use members::MembersViewModel;
pub use profile::{ProfileForm, ProfileViewModel};
pub use state::{MutationOutcome, Notice, ViewError, ViewHandle, ViewState};
