//! Input validation for user registration

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// Usernames: 3-32 characters of letters, digits, `_`, `.` or `-`
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("valid username regex"));

/// Display names: letters and spaces only
static NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z ]+$").expect("valid name regex"));

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum accepted password length; bcrypt ignores input past 72 bytes
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.errors.push(ValidationError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }

    /// One-line summary, e.g. for a `Validation` domain error message
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Check a display name contains only letters and spaces
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && NAME_REGEX.is_match(name)
}

/// Check a username against the allowed character set and length
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Validate a registration form, collecting every failing field
pub fn validate_registration(
    name: &str,
    username: &str,
    password: &str,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if !is_valid_name(name) {
        errors.add_error("name", "must contain only letters and spaces", "invalid_name");
    }

    if username.trim().is_empty() {
        errors.add_error("username", "is required", "required");
    } else if !is_valid_username(username) {
        errors.add_error(
            "username",
            "must be 3-32 characters of letters, digits, '_', '.' or '-'",
            "invalid_username",
        );
    }

    if password.is_empty() {
        errors.add_error("password", "is required", "required");
    } else if password.len() < MIN_PASSWORD_LENGTH {
        errors.add_error(
            "password",
            format!("must be at least {} characters", MIN_PASSWORD_LENGTH),
            "password_too_short",
        );
    } else if password.len() > MAX_PASSWORD_LENGTH {
        errors.add_error(
            "password",
            format!("must be at most {} bytes", MAX_PASSWORD_LENGTH),
            "password_too_long",
        );
    }

    errors.into_result()
}
