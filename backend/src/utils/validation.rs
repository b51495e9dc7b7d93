use regex::Regex;
use validator::{ValidationError, ValidationErrors};

use crate::error::AppError;
use runway_platform_shared::USERNAME_PATTERN;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let email_regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap();

    if email.len() > 254 {
        return Err(ValidationError::new("email_too_long"));
    }

    if !email_regex.is_match(email) {
        return Err(ValidationError::new("invalid_email_format"));
    }

    Ok(())
}

/// Validate a derived or chosen username
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username_regex = Regex::new(USERNAME_PATTERN).unwrap();

    if !username_regex.is_match(username) {
        return Err(ValidationError::new("invalid_username_format"));
    }

    Ok(())
}

/// Convert validator errors into the app error type
pub fn validation_errors_to_app_error(errors: ValidationErrors) -> AppError {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            messages.push(format!("{}: {}", field, error.code));
        }
    }
    messages.sort();
    AppError::Validation(messages.join(", "))
}
