//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`LibraryApi`] - the library service's REST surface
//! - [`TokenStorage`] - persistence for the session token

pub mod library;
pub mod storage;

pub use library::LibraryApi;
pub use storage::{StorageError, TokenStorage};
