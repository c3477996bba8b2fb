//! Wire types for the library service REST API.
//!
//! Field names follow the server's camelCase JSON. Everything here is a
//! read-only snapshot of server-owned state; the client never edits these
//! values in place.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// POST /api/auth/login body.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/register body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response from both auth endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The server answers a rejected registration with an empty body object,
    /// so the token may be missing even on a 2xx.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_available() -> bool {
    true
}

/// A book as listed by GET /api/books/available.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default = "default_available", alias = "availability")]
    pub available: bool,
}

/// The subset of a book embedded in a loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub isbn: Option<String>,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
}

/// A loan as listed by GET /api/loans/my.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    pub book: BookSummary,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub loan_date: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub due_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub return_date: Option<DateTime<Utc>>,
    /// Accrued fine, computed by the server.
    #[serde(default)]
    pub fine: f64,
    /// Number of renewals already used.
    #[serde(default)]
    pub extensions: u32,
}

impl Loan {
    /// A loan is active until the server records a return date.
    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    /// Fine formatted as a currency amount, e.g. `$1.50`.
    pub fn fine_display(&self) -> String {
        format!("${:.2}", self.fine)
    }
}

/// The signed-in member's profile (GET /api/members/me).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

/// PUT /api/members/me body.
///
/// `password` is write-only and always present in the body; it is empty
/// when the user did not type a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// A library member as seen by the admin directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub registration_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub membership_expiry_date: Option<DateTime<Utc>>,
}

/// Jackson writes unset fields as `null` rather than leaving them out.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Timestamps arrive either as epoch milliseconds (Jackson's default for
/// `java.util.Date`) or as strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

fn parse_timestamp_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    // Jackson with an explicit offset but no colon, e.g. +0000
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

fn raw_to_datetime<E: serde::de::Error>(raw: RawTimestamp) -> Result<DateTime<Utc>, E> {
    match raw {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| E::custom(format!("timestamp out of range: {}", ms))),
        RawTimestamp::Text(text) => parse_timestamp_text(&text)
            .ok_or_else(|| E::custom(format!("unrecognized date format: {}", text))),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawTimestamp::deserialize(deserializer)?;
    raw_to_datetime(raw)
}

fn deserialize_optional_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(raw) => raw_to_datetime(raw).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_deserialize() {
        let json = r#"{"id": 1, "isbn": "978-0", "title": "Dune", "author": "Herbert"}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.title, "Dune");
        assert!(book.available);
    }

    #[test]
    fn test_book_availability_alias() {
        let json = r#"{"id": 2, "isbn": "x", "title": "t", "author": "a", "availability": false}"#;
        let book: Book = serde_json::from_str(json).unwrap();
        assert!(!book.available);
    }

    #[test]
    fn test_loan_with_millis_dates() {
        let json = r#"{
            "id": 7,
            "book": {"id": 1, "isbn": "978-0", "title": "Dune", "author": "Herbert"},
            "loanDate": 1704067200000,
            "dueDate": 1705276800000,
            "returnDate": null,
            "fine": 0.0,
            "extensions": 1
        }"#;
        let loan: Loan = serde_json::from_str(json).unwrap();
        assert_eq!(loan.id, 7);
        assert_eq!(loan.book.title, "Dune");
        assert_eq!(loan.loan_date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
        assert!(loan.is_active());
        assert_eq!(loan.extensions, 1);
        assert_eq!(loan.fine_display(), "$0.00");
    }

    #[test]
    fn test_loan_with_string_dates() {
        let json = r#"{
            "id": 8,
            "book": {"title": "Emma"},
            "loanDate": "2024-01-01T10:30:00.000+00:00",
            "dueDate": "2024-01-15",
            "returnDate": "2024-01-20T09:00:00",
            "fine": 2.5
        }"#;
        let loan: Loan = serde_json::from_str(json).unwrap();
        assert!(!loan.is_active());
        assert_eq!(loan.due_date.date_naive().to_string(), "2024-01-15");
        assert_eq!(loan.fine_display(), "$2.50");
        assert_eq!(loan.extensions, 0);
        assert!(loan.book.isbn.is_none());
    }

    #[test]
    fn test_loan_rejects_garbage_date() {
        let json = r#"{"id": 1, "book": {"title": "x"}, "loanDate": "yesterday", "dueDate": 0}"#;
        assert!(serde_json::from_str::<Loan>(json).is_err());
    }

    #[test]
    fn test_profile_update_always_sends_password() {
        let update = ProfileUpdate {
            name: "Alice".to_string(),
            email: "a@example.com".to_string(),
            username: "alice".to_string(),
            password: String::new(),
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["password"], "");
        assert_eq!(json.as_object().unwrap().len(), 4);

        let with_password = ProfileUpdate {
            password: "new".to_string(),
            ..update
        };
        let json = serde_json::to_value(&with_password).unwrap();
        assert_eq!(json["password"], "new");
    }

    #[test]
    fn test_profile_null_fields_become_empty() {
        let json = r#"{"name": "Alice", "email": null, "username": "alice"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.email, "");
        assert_eq!(profile.name, "Alice");

        let sparse: Profile = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(sparse, Profile::default());
    }

    #[test]
    fn test_token_response_without_token() {
        let resp: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.token.is_none());
    }

    #[test]
    fn test_member_deserialize() {
        let json = r#"{
            "id": 3,
            "name": "Carol",
            "contactInfo": "555-0101",
            "registrationDate": "2023-05-01",
            "membershipExpiryDate": null
        }"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.contact_info.as_deref(), Some("555-0101"));
        assert!(member.registration_date.is_some());
        assert!(member.membership_expiry_date.is_none());
        assert!(member.address.is_none());
    }
}
