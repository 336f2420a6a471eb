//! Field checks applied to store inputs before they are merged into records.

use chrono::NaiveDate;

use super::errors::{StoreError, StoreResult};

/// Longest text accepted in a name/description style field
pub const MAX_TEXT_LENGTH: usize = 256;

/// SMS body limit
pub const MAX_MESSAGE_LENGTH: usize = 160;

/// Trim `value` and reject it when empty or too long
pub fn required_text(field: &str, value: &str) -> StoreResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(StoreError::validation(format!("{} cannot be empty", field)));
    }

    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(StoreError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// Trim an optional field; empty strings are kept as empty
pub fn optional_text(field: &str, value: &str) -> StoreResult<String> {
    let trimmed = value.trim();

    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(StoreError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_TEXT_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

/// An empty email is allowed; anything else needs a local part and a domain
pub fn email(value: &str) -> StoreResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(String::new());
    }

    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(trimmed.to_string())
        }
        _ => Err(StoreError::validation(format!("Invalid email address: {}", trimmed))),
    }
}

/// Amounts are stored unsigned; the transaction type carries the sign
pub fn amount(value: f64) -> StoreResult<f64> {
    if !value.is_finite() {
        return Err(StoreError::validation("Amount must be a finite number"));
    }

    if value < 0.0 {
        return Err(StoreError::validation(
            "Amount cannot be negative, use the transaction type instead",
        ));
    }

    Ok(value)
}

pub fn message_body(value: &str) -> StoreResult<String> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(StoreError::validation("Message cannot be empty"));
    }

    let length = trimmed.chars().count();
    if length > MAX_MESSAGE_LENGTH {
        return Err(StoreError::validation(format!(
            "Message is {} characters, the limit is {}",
            length, MAX_MESSAGE_LENGTH
        )));
    }

    Ok(trimmed.to_string())
}

pub fn maintenance_window(last: NaiveDate, next: NaiveDate) -> StoreResult<()> {
    if next < last {
        return Err(StoreError::validation(format!(
            "Next maintenance ({}) cannot be before last maintenance ({})",
            next, last
        )));
    }
    Ok(())
}
