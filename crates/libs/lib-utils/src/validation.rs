//! # Validation Utilities
//!
//! Input validation helpers shared by request DTOs and the password policy.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate email format.
///
/// Structural check only: exactly one `@`, a non-empty local part without
/// leading, trailing or doubled dots, and a dotted domain whose labels are
/// non-empty and made of alphanumerics or `-`. No whitespace anywhere.
pub fn validate_email(email: &str) -> Result<(), String> {
    const INVALID: &str = "Invalid email format";

    if email.chars().any(char::is_whitespace) {
        return Err(INVALID.to_string());
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| INVALID.to_string())?;
    if domain.contains('@') {
        return Err(INVALID.to_string());
    }

    if local.is_empty() || local.len() > 64 {
        return Err(INVALID.to_string());
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(INVALID.to_string());
    }

    if domain.len() > 255 || !domain.contains('.') {
        return Err(INVALID.to_string());
    }
    let labels_ok = domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !labels_ok {
        return Err(INVALID.to_string());
    }

    Ok(())
}

/// Validate minimum length, counted in characters.
pub fn validate_min_length(value: &str, min: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() < min {
        Err(format!("{} must be at least {} characters", field_name, min))
    } else {
        Ok(())
    }
}
