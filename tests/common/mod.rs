//! Common test utilities for integration tests.
//!
//! Token builders, wire fixtures and helpers for wiring a client to a
//! wiremock server.
//!
//! # Example
//!
//! ```ignore
//! let server = MockServer::start().await;
//! let (session, client) = client_for(&server, Some(member_token("alice")));
//! ```

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use libris::api::ApiClient;
use libris::session::SessionStore;
use wiremock::MockServer;

/// 2100-01-01T00:00:00Z
pub const FAR_FUTURE: i64 = 4_102_444_800;

/// Build an unsigned token carrying `claims`.
pub fn token_with_claims(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.test-signature", header, payload)
}

pub fn token_for(role: &str, subject: &str) -> String {
    token_with_claims(serde_json::json!({
        "role": role,
        "sub": subject,
        "iat": 1_700_000_000,
        "exp": FAR_FUTURE,
    }))
}

pub fn member_token(subject: &str) -> String {
    token_for("MEMBER", subject)
}

pub fn admin_token(subject: &str) -> String {
    token_for("ADMIN", subject)
}

/// An in-memory session, optionally pre-populated, and a client reading from it.
pub fn client_for(server: &MockServer, token: Option<String>) -> (Arc<SessionStore>, ApiClient) {
    let session = Arc::new(SessionStore::in_memory());
    if let Some(token) = token {
        session.set_session(&token).unwrap();
    }
    let client = ApiClient::new(server.uri(), Arc::clone(&session));
    (session, client)
}
