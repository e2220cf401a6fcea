use std::sync::OnceLock;

use regex::Regex;

use crate::domain::{DomainError, DomainResult};

/// Minimum password length accepted at sign-up
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// Email must be present and shaped like local@domain.tld
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Email cannot be empty".to_string(),
        ));
    }
    if !email_pattern().is_match(email) {
        return Err(DomainError::InvariantViolation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

/// Both fields are required before any call to the credential store
pub fn validate_credentials(email: &str, password: &str) -> DomainResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(DomainError::InvariantViolation(
            "Please fill in all fields".to_string(),
        ));
    }
    validate_email(email)
}

/// Sign-up additionally enforces the password length
pub fn validate_new_password(password: &str) -> DomainResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::InvariantViolation(format!(
            "Password should be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("bob@example.com").is_ok());
        assert!(validate_email("  bob@example.com ").is_ok());
    }

    #[test]
    fn test_invalid_email() {
        assert!(validate_email("bob").is_err());
        assert!(validate_email("bob@example").is_err());
        assert!(validate_email("bob smith@example.com").is_err());
    }

    #[test]
    fn test_missing_fields() {
        let err = validate_credentials("", "secret").unwrap_err();
        assert!(err.to_string().contains("Please fill in all fields"));
        assert!(validate_credentials("bob@example.com", "").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_new_password("12345").is_err());
        assert!(validate_new_password("123456").is_ok());
    }
}
