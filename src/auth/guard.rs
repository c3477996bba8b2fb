//! Navigation guard.
//!
//! Routing is decided from the unverified token claims. It only chooses
//! which screen to show; the server still authorizes every request.

use std::fmt;

use crate::session::{decode_claims, Claims, MalformedTokenError, Role, SessionError, SessionStore};

/// Landing page after authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Landing {
    AdminDashboard,
    MemberDashboard,
}

impl Landing {
    /// `ADMIN` lands on the admin dashboard, every other role on the member one.
    pub fn for_claims(claims: &Claims) -> Self {
        match claims.role {
            Role::Admin => Landing::AdminDashboard,
            Role::Member | Role::Other(_) => Landing::MemberDashboard,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Landing::AdminDashboard => "/admin-dashboard",
            Landing::MemberDashboard => "/member-dashboard",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Landing::AdminDashboard => "Admin Dashboard",
            Landing::MemberDashboard => "Member Dashboard",
        }
    }
}

impl fmt::Display for Landing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Landing page for a freshly issued token.
///
/// A token that does not decode is an error, never a default route.
pub fn landing_for_token(token: &str) -> Result<Landing, MalformedTokenError> {
    decode_claims(token).map(|claims| Landing::for_claims(&claims))
}

/// Landing page for whoever is currently signed in.
pub fn landing_for_session(session: &SessionStore) -> Result<Landing, SessionError> {
    session.claims().map(|claims| Landing::for_claims(&claims))
}
