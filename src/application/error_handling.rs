// src/application/error_handling.rs
//
// Error Handling for Commands
//
// - Maps internal errors to user-facing responses
// - Validation and authentication messages are shown as-is
// - Not-found is a soft failure
// - Everything else is logged and reported generically

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;
use crate::error::AppError;

/// Standard error response for the UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Missing or malformed input
    Validation,

    /// Bad credentials, duplicate account, not signed in
    Authentication,

    /// Role does not permit the operation
    Forbidden,

    /// Referenced record missing at mutation time
    NotFound,

    /// Business rule rejected the operation (already adopted, already decided)
    DomainError,

    Database,

    Internal,
}

pub type CommandResult<T> = Result<T, ErrorResponse>;

impl ErrorResponse {
    fn new(error_type: ErrorType, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message: message.into(),
            details,
        }
    }

    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::Validation(message) => Self::validation(message),

            AppError::Authentication(message) => {
                Self::new(ErrorType::Authentication, message, None)
            }

            AppError::Forbidden(message) => Self::new(
                ErrorType::Forbidden,
                "You do not have permission to do that",
                Some(message),
            ),

            AppError::NotFound => Self::new(ErrorType::NotFound, "Resource not found", None),

            AppError::Domain(DomainError::NotFound(what)) => {
                Self::new(ErrorType::NotFound, format!("{} not found", what), None)
            }

            AppError::Domain(domain_error) => Self::new(
                ErrorType::DomainError,
                "The operation is not allowed right now",
                Some(domain_error.to_string()),
            ),

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed",
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);
                Self::new(ErrorType::Database, "Database connection failed", None)
            }

            other => {
                log::error!("Unexpected error: {:?}", other);
                Self::new(ErrorType::Internal, "Something went wrong", None)
            }
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorType::Validation, message, None)
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(ErrorType::NotFound, format!("{} not found", resource), None)
    }
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error)
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::NotFound);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Resource not found");
        assert!(!error.success);
    }

    #[test]
    fn test_validation_message_shown_as_is() {
        let error = ErrorResponse::from(AppError::validation("Please fill in all fields"));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Please fill in all fields");
    }

    #[test]
    fn test_authentication_message_verbatim() {
        let error = ErrorResponse::from(AppError::Authentication(
            "The email address is already in use by another account.".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Authentication);
        assert_eq!(
            error.message,
            "The email address is already in use by another account."
        );
    }

    #[test]
    fn test_unknown_errors_are_generic() {
        let error = ErrorResponse::from(AppError::Other("disk on fire".to_string()));
        assert_eq!(error.error_type, ErrorType::Internal);
        assert!(!error.message.contains("disk"));
    }

    #[test]
    fn test_domain_rejection() {
        let error = ErrorResponse::from(AppError::Domain(DomainError::InvalidStateTransition(
            "already decided".to_string(),
        )));
        assert_eq!(error.error_type, ErrorType::DomainError);
        assert!(error.details.unwrap().contains("already decided"));
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Animal");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Animal not found"));
    }
}
