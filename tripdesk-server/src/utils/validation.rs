//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so the handlers
//! apply these limits before any write.

use shared::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: guest, driver, employee, organisation, route
pub const MAX_NAME_LEN: usize = 200;

/// Notes, comments, special instructions, routing descriptions
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: mobile numbers, booking ids, vehicle numbers
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

/// Signature links (URL or rejected-at-boundary inline payload)
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that a string, possibly blank, is within the length limit.
pub fn validate_text_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("A. Rao", "Guest_Name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "Guest_Name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "Guest_Name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn blank_is_fine_when_optional() {
        assert!(validate_text_len("", "Notes", MAX_NOTE_LEN).is_ok());
    }
}
