//! Display formatting for terminal output
//!
//! Provides utilities for formatting accounts and transactions as plain-text
//! tables and detail views.

use std::fmt::Write;

use chrono::NaiveDate;

pub mod account;
pub mod transaction;

pub use account::{format_account_details, format_account_list, format_progress};
pub use transaction::{format_history, format_transaction_details, format_transaction_row};

/// Fallback used when the configured date format is not a valid pattern
const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a date with a user-supplied strftime pattern
pub(crate) fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

/// Truncate a string to a maximum length, padding short strings
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Short", 10).trim(), "Short");
        let result = truncate("A very long string", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_date(date, "%Y-%m-%d"), "2024-02-29");
        assert_eq!(format_date(date, "%d.%m.%Y"), "29.02.2024");
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(format_date(date, "%Q"), "2024-02-29");
    }
}
