//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`FileTokenStorage`] - session token persisted as JSON on disk
//!
//! The production [`crate::traits::LibraryApi`] implementation is
//! [`crate::api::ApiClient`].
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockLibraryApi`] - scripted API responses with call recording
//! - [`mock::InMemoryTokenStorage`] - in-memory token storage

pub mod file_session;
pub mod mock;

pub use file_session::FileTokenStorage;
pub use mock::{InMemoryTokenStorage, MockLibraryApi};
