//! Login, registration and logout.
//!
//! Flow:
//! 1. Submit credentials to the auth endpoint
//! 2. Decode the returned token (a token that doesn't decode is never stored)
//! 3. Store it in the session
//! 4. Hand back the landing page for its role

use std::fmt;
use std::sync::Arc;

use super::guard::{landing_for_session, landing_for_token, Landing};
use crate::api::models::{LoginRequest, RegisterRequest, TokenResponse};
use crate::api::ApiError;
use crate::session::{MalformedTokenError, SessionError, SessionStore};
use crate::traits::LibraryApi;

const LOGIN_FAILED: &str = "Login failed";
const REGISTRATION_FAILED: &str = "Registration failed";

/// Why authentication did not produce a session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthFailure {
    /// The server rejected the request or could not be reached.
    Api { error: ApiError, message: String },
    /// The server answered 2xx without a token.
    MissingToken,
    /// The server returned a token the client cannot decode.
    MalformedToken(MalformedTokenError),
}

impl AuthFailure {
    /// Text to show next to the form.
    pub fn user_message(&self) -> String {
        match self {
            AuthFailure::Api { message, .. } => message.clone(),
            AuthFailure::MissingToken => "The server did not return a session token.".to_string(),
            AuthFailure::MalformedToken(_) => {
                "The server returned a session token this client cannot read.".to_string()
            }
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthFailure::Api { error, .. } => error.error_code(),
            AuthFailure::MissingToken => "E_AUTH_NO_TOKEN",
            AuthFailure::MalformedToken(_) => "E_AUTH_MALFORMED_TOKEN",
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthFailure::Api { error, .. } => write!(f, "Authentication request failed: {}", error),
            AuthFailure::MissingToken => write!(f, "Authentication response had no token"),
            AuthFailure::MalformedToken(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AuthFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthFailure::Api { error, .. } => Some(error),
            AuthFailure::MalformedToken(e) => Some(e),
            AuthFailure::MissingToken => None,
        }
    }
}

/// Drives authentication against the injected session store.
pub struct AuthFlow<A: LibraryApi> {
    api: Arc<A>,
    session: Arc<SessionStore>,
}

impl<A: LibraryApi> AuthFlow<A> {
    pub fn new(api: Arc<A>, session: Arc<SessionStore>) -> Self {
        Self { api, session }
    }

    /// POST /api/auth/login, then establish the session.
    ///
    /// A rejection shows the server's message whatever the status, since
    /// bad credentials come back as 401/403.
    pub async fn login(&self, username: &str, password: &str) -> Result<Landing, AuthFailure> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await.map_err(|error| {
            tracing::warn!("Login failed for {}: {}", username, error);
            let message = error
                .server_message
                .clone()
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            AuthFailure::Api { error, message }
        })?;
        self.establish(response)
    }

    /// POST /api/auth/register, then establish the session.
    ///
    /// Any server-side rejection shows the same generic message.
    pub async fn register(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Landing, AuthFailure> {
        let request = RegisterRequest {
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self.api.register(&request).await.map_err(|error| {
            tracing::warn!("Registration failed for {}: {}", username, error);
            AuthFailure::Api {
                error,
                message: REGISTRATION_FAILED.to_string(),
            }
        })?;
        self.establish(response)
    }

    fn establish(&self, response: TokenResponse) -> Result<Landing, AuthFailure> {
        let token = response
            .token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthFailure::MissingToken)?;

        let landing = landing_for_token(&token).map_err(|e| {
            tracing::error!("Server issued a token that does not decode: {}", e);
            AuthFailure::MalformedToken(e)
        })?;

        self.session
            .set_session(&token)
            .map_err(|_| AuthFailure::MissingToken)?;

        tracing::info!("Authenticated, landing on {}", landing);
        Ok(landing)
    }

    /// Landing page for the current session, e.g. when resuming a stored one.
    pub fn current_landing(&self) -> Result<Landing, SessionError> {
        landing_for_session(&self.session)
    }

    /// Destroy the session.
    pub fn logout(&self) {
        self.session.clear_session();
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }
}
