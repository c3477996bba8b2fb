//! Gateway error type.
//!
//! Every failed call to the library service is reduced to an [`ApiError`]
//! whose [`ApiErrorKind`] is derived from what came back (or didn't).

use std::fmt;

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// No response reached the client.
    NetworkFailure,
    /// 401 or 403: token missing, invalid or expired.
    Unauthorized,
    /// Any other 4xx: the server rejected the request or a business rule.
    ValidationFailure,
    /// 5xx.
    ServerFailure,
    /// Anything else, including a success response we could not decode.
    Unknown,
}

impl ApiErrorKind {
    /// Map an HTTP status code to a kind.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ApiErrorKind::Unauthorized,
            400..=499 => ApiErrorKind::ValidationFailure,
            500..=599 => ApiErrorKind::ServerFailure,
            _ => ApiErrorKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorKind::NetworkFailure => "network_failure",
            ApiErrorKind::Unauthorized => "unauthorized",
            ApiErrorKind::ValidationFailure => "validation_failure",
            ApiErrorKind::ServerFailure => "server_failure",
            ApiErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed call to the library service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// Present when a response was received.
    pub http_status: Option<u16>,
    /// The `message` field of the error body, when the server sent one.
    pub server_message: Option<String>,
    /// Technical description for logs.
    pub detail: String,
}

impl ApiError {
    /// The transport failed before any response arrived.
    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::NetworkFailure,
            http_status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    /// The server answered with a non-success status.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::from_status(status),
            http_status: Some(status),
            server_message: extract_server_message(body),
            detail: truncate(body, 200),
        }
    }

    /// A success response whose body did not have the expected shape.
    pub fn invalid_response(status: u16, detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Unknown,
            http_status: Some(status),
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    /// Text to show the user.
    ///
    /// A validation failure carrying a server message shows that message
    /// verbatim; everything else shows `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match (&self.kind, &self.server_message) {
            (ApiErrorKind::ValidationFailure, Some(message)) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ApiErrorKind::NetworkFailure => "E_API_NETWORK",
            ApiErrorKind::Unauthorized => "E_API_UNAUTHORIZED",
            ApiErrorKind::ValidationFailure => "E_API_VALIDATION",
            ApiErrorKind::ServerFailure => "E_API_SERVER",
            ApiErrorKind::Unknown => "E_API_UNKNOWN",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.http_status, &self.server_message) {
            (Some(status), Some(message)) => {
                write!(f, "{} (HTTP {}): {}", self.kind, status, message)
            }
            (Some(status), None) => write!(f, "{} (HTTP {}): {}", self.kind, status, self.detail),
            (None, _) => write!(f, "{}: {}", self.kind, self.detail),
        }
    }
}

impl std::error::Error for ApiError {}

/// Pull a non-empty `message` string out of a JSON error body.
fn extract_server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let message = value.get("message")?.as_str()?.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
