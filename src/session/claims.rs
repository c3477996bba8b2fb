//! Token claim decoding.
//!
//! Tokens issued by the library service are JWTs. The client reads the
//! payload segment to decide where to route the user; it never verifies the
//! signature. Anything that matters for access control is enforced again by
//! the server on every request.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::Value;
use std::fmt;

/// Role carried in the `role` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
    /// Any role string the client does not know about, kept verbatim.
    Other(String),
}

impl Role {
    fn from_claim(value: &str) -> Self {
        match value {
            "ADMIN" => Role::Admin,
            "MEMBER" => Role::Member,
            other => Role::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
            Role::Other(s) => s,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims decoded from a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub role: Role,
    /// The `sub` claim (the username the token was issued for).
    pub subject: String,
    /// The `exp` claim as a Unix timestamp in seconds.
    pub expiry: i64,
    /// The `iat` claim, when the issuer sets one.
    pub issued_at: Option<i64>,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether `exp` is in the past.
    ///
    /// Display only: the client never refuses to send an expired token, the
    /// server is the one that rejects it.
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp() >= self.expiry
    }

    pub fn expires_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.expiry, 0)
    }
}

/// A token could not be parsed into the expected claim shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedTokenError {
    /// The token is not `header.payload.signature`.
    SegmentCount(usize),
    /// The payload segment is not base64url.
    Encoding(String),
    /// The payload is not a JSON object.
    Json(String),
    /// A required claim is missing or has the wrong type.
    MissingClaim(&'static str),
}

impl fmt::Display for MalformedTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedTokenError::SegmentCount(n) => {
                write!(f, "Malformed token: expected 3 segments, found {}", n)
            }
            MalformedTokenError::Encoding(msg) => {
                write!(f, "Malformed token: payload is not base64url: {}", msg)
            }
            MalformedTokenError::Json(msg) => {
                write!(f, "Malformed token: payload is not a JSON object: {}", msg)
            }
            MalformedTokenError::MissingClaim(claim) => {
                write!(f, "Malformed token: missing or invalid '{}' claim", claim)
            }
        }
    }
}

impl std::error::Error for MalformedTokenError {}

/// Decode the claims embedded in `token` without checking its signature.
pub fn decode_claims(token: &str) -> Result<Claims, MalformedTokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(MalformedTokenError::SegmentCount(parts.len()));
    }

    // Some issuers pad the segments even though JWT says they shouldn't.
    let payload = URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| MalformedTokenError::Encoding(e.to_string()))?;

    let value: Value =
        serde_json::from_slice(&payload).map_err(|e| MalformedTokenError::Json(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| MalformedTokenError::Json("payload is not an object".to_string()))?;

    let role = object
        .get("role")
        .and_then(Value::as_str)
        .ok_or(MalformedTokenError::MissingClaim("role"))?;
    let subject = object
        .get("sub")
        .and_then(Value::as_str)
        .ok_or(MalformedTokenError::MissingClaim("sub"))?;
    let expiry = object
        .get("exp")
        .and_then(Value::as_i64)
        .ok_or(MalformedTokenError::MissingClaim("exp"))?;
    let issued_at = object.get("iat").and_then(Value::as_i64);

    Ok(Claims {
        role: Role::from_claim(role),
        subject: subject.to_string(),
        expiry,
        issued_at,
    })
}
