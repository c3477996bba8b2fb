//! Authentication: login/registration orchestration and post-login routing.
//!
//! - [`AuthFlow`] - login, registration and logout against the session store
//! - [`guard`] - decides the landing page from token claims

pub mod flow;
pub mod guard;

pub use flow::{AuthFailure, AuthFlow};
pub use guard::{landing_for_session, landing_for_token, Landing};
