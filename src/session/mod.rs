//! Session state: the current token and the claims it carries.

pub mod claims;
pub mod store;

pub use claims::{decode_claims, Claims, MalformedTokenError, Role};
pub use store::{SessionError, SessionStore};
