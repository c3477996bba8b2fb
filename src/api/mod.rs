//! API gateway for the library service.
//!
//! - [`ApiClient`] - reqwest-based client attaching the session token
//! - [`ApiError`] / [`ApiErrorKind`] - uniform failure classification
//! - [`models`] - wire types

pub mod client;
pub mod error;
pub mod models;

pub use client::{ApiClient, Payload, DEFAULT_API_URL};
pub use error::{ApiError, ApiErrorKind};
pub use models::{Book, BookSummary, Loan, Member, Profile, ProfileUpdate};
