//! Field validators
//!
//! Each check inspects one (possibly untrimmed) value and returns the message to
//! show next to the field, or `None` when the value is acceptable.

use crate::models::{Department, EmployeeStatus};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Non-empty once surrounding whitespace is removed
pub fn required_text(value: &str, label: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{label} is required"))
    } else {
        None
    }
}

pub fn first_name(value: &str) -> Option<String> {
    required_text(value, "First name")
}

pub fn last_name(value: &str) -> Option<String> {
    required_text(value, "Last name")
}

pub fn position(value: &str) -> Option<String> {
    required_text(value, "Position")
}

/// One of the fixed department names (empty selection included)
pub fn department(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Department is required".into());
    }
    match value.parse::<Department>() {
        Ok(_) => None,
        Err(_) => Some("Unknown department".into()),
    }
}

pub fn status(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some("Status is required".into());
    }
    match value.parse::<EmployeeStatus>() {
        Ok(_) => None,
        Err(_) => Some("Unknown status".into()),
    }
}

/// Positive whole number
pub fn salary(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return Some("Salary is required".into());
    }
    match value.parse::<u64>() {
        Ok(n) if n > 0 => None,
        _ => Some("Salary must be a positive number".into()),
    }
}

/// Presence only; the calendar value is not range-checked
pub fn hire_date(value: &str) -> Option<String> {
    required_text(value, "Hire date")
}

pub fn email(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Email is required".into())
    } else if !EMAIL_PATTERN.is_match(value) {
        Some("Invalid email format".into())
    } else {
        None
    }
}

/// Exactly ten decimal digits
pub fn phone(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        Some("Phone is required".into())
    } else if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        Some("Phone must be 10 digits".into())
    } else {
        None
    }
}

pub fn leave_balance(value: &str) -> Option<String> {
    match value.trim().parse::<u32>() {
        Ok(_) => None,
        Err(_) => Some("Leave balance must be a non-negative number".into()),
    }
}
