//! Plain-text tables for the library resources.

use chrono::{DateTime, Utc};

use crate::api::models::{Book, Loan, Member, Profile};

fn date(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d").to_string()
}

fn optional_date(value: Option<&DateTime<Utc>>) -> String {
    value.map(date).unwrap_or_else(|| "-".to_string())
}

/// Truncate to `width` characters, marking the cut with an ellipsis.
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn book_lines(books: &[Book]) -> Vec<String> {
    if books.is_empty() {
        return vec!["  No books available.".to_string()];
    }
    let mut lines = vec![format!("  {:<18} {:<28} {}", "ISBN", "TITLE", "AUTHOR")];
    lines.extend(books.iter().map(|b| {
        format!("  {:<18} {:<28} {}", fit(&b.isbn, 18), fit(&b.title, 28), b.author)
    }));
    lines
}

pub fn loan_lines(loans: &[Loan]) -> Vec<String> {
    if loans.is_empty() {
        return vec!["  You have no loans.".to_string()];
    }
    let mut lines = vec![format!(
        "  {:<6} {:<26} {:<11} {:<11} {:<11} {:>8}",
        "ID", "BOOK", "BORROWED", "DUE", "RETURNED", "FINE"
    )];
    lines.extend(loans.iter().map(|l| {
        format!(
            "  {:<6} {:<26} {:<11} {:<11} {:<11} {:>8}",
            l.id,
            fit(&l.book.title, 26),
            date(&l.loan_date),
            date(&l.due_date),
            optional_date(l.return_date.as_ref()),
            l.fine_display()
        )
    }));
    lines
}

pub fn profile_lines(profile: &Profile) -> Vec<String> {
    vec![
        format!("  Name:     {}", profile.name),
        format!("  Email:    {}", profile.email),
        format!("  Username: {}", profile.username),
    ]
}

pub fn member_lines(members: &[Member]) -> Vec<String> {
    if members.is_empty() {
        return vec!["  No members found.".to_string()];
    }
    let mut lines = vec![format!("  {:<6} {:<24} {}", "ID", "NAME", "EMAIL")];
    lines.extend(members.iter().map(|m| {
        format!(
            "  {:<6} {:<24} {}",
            m.id,
            fit(&m.name, 24),
            m.email.as_deref().unwrap_or("-")
        )
    }));
    lines
}

pub fn member_detail_lines(member: &Member) -> Vec<String> {
    let or_dash = |v: Option<&String>| v.map(String::as_str).unwrap_or("-").to_string();
    vec![
        format!("  ID:             {}", member.id),
        format!("  Name:           {}", member.name),
        format!("  Username:       {}", or_dash(member.username.as_ref())),
        format!("  Email:          {}", or_dash(member.email.as_ref())),
        format!("  Address:        {}", or_dash(member.address.as_ref())),
        format!("  Contact:        {}", or_dash(member.contact_info.as_ref())),
        format!(
            "  Registered:     {}",
            optional_date(member.registration_date.as_ref())
        ),
        format!(
            "  Membership end: {}",
            optional_date(member.membership_expiry_date.as_ref())
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::BookSummary;
    use chrono::TimeZone;

    #[test]
    fn test_fit() {
        assert_eq!(fit("Dune", 10), "Dune");
        assert_eq!(fit("The Left Hand of Darkness", 10), "The Left …");
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(book_lines(&[]), vec!["  No books available.".to_string()]);
        assert_eq!(loan_lines(&[]).len(), 1);
        assert_eq!(member_lines(&[]).len(), 1);
    }

    #[test]
    fn test_loan_row() {
        let loan = Loan {
            id: 12,
            book: BookSummary {
                id: None,
                isbn: None,
                title: "Dune".to_string(),
                author: None,
            },
            loan_date: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap(),
            return_date: None,
            fine: 1.5,
            extensions: 0,
        };
        let lines = loan_lines(&[loan]);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Dune"));
        assert!(lines[1].contains("2024-03-15"));
        assert!(lines[1].contains(" - "));
        assert!(lines[1].ends_with("$1.50"));
    }

    #[test]
    fn test_member_details_fill_missing_fields() {
        let member = Member {
            id: 3,
            name: "Grace".to_string(),
            email: Some("grace@example.com".to_string()),
            username: None,
            address: None,
            contact_info: None,
            registration_date: None,
            membership_expiry_date: None,
        };
        let lines = member_detail_lines(&member);
        assert!(lines.iter().any(|l| l.ends_with("grace@example.com")));
        assert!(lines.iter().any(|l| l == "  Username:       -"));
    }
}
