//! Wire fixtures shaped like the library service's JSON.

use libris::api::models::{Book, Profile};
use serde_json::{json, Value};

pub fn book_json(id: i64, isbn: &str, title: &str) -> Value {
    json!({
        "id": id,
        "isbn": isbn,
        "title": title,
        "author": "Frank Herbert",
        "available": true
    })
}

pub fn book(id: i64, isbn: &str, title: &str) -> Book {
    Book {
        id,
        isbn: isbn.to_string(),
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        available: true,
    }
}

/// A loan as the server serializes it: dates as epoch milliseconds.
pub fn loan_json(id: i64, title: &str, returned: bool) -> Value {
    json!({
        "id": id,
        "book": { "id": id, "isbn": format!("ISBN-{}", id), "title": title },
        "loanDate": 1_709_251_200_000_i64,
        "dueDate": 1_710_460_800_000_i64,
        "returnDate": if returned { json!(1_710_000_000_000_i64) } else { Value::Null },
        "fine": 0.0,
        "extensions": 0
    })
}

pub fn profile() -> Profile {
    Profile {
        name: "Alice Liddell".to_string(),
        email: "alice@example.com".to_string(),
        username: "alice".to_string(),
    }
}

pub fn profile_json() -> Value {
    json!({
        "name": "Alice Liddell",
        "email": "alice@example.com",
        "username": "alice"
    })
}

pub fn member_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "username": name.to_lowercase(),
        "address": "1 Library Lane",
        "contactInfo": "555-0100",
        "registrationDate": "2024-01-15T10:00:00",
        "membershipExpiryDate": "2025-01-15"
    })
}
