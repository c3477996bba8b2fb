//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockLibraryApi`] - library API with scripted responses
//! - [`InMemoryTokenStorage`] - in-memory token storage

pub mod library;
pub mod storage;

pub use library::{MockLibraryApi, RecordedCall};
pub use storage::InMemoryTokenStorage;
