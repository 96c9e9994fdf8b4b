//! Account-specific error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingCredentials | 400 |
//! | EmailTaken | 400 |
//! | UsernameTaken | 400 |
//! | InvalidRole | 400 |
//! | NoProfileData | 400 |
//! | ValidationFailed | 400 |
//! | InvalidCredentials | 401 |
//! | UserNotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, UserId, ValidationError};

/// Errors raised by registration, login and profile operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    MissingCredentials,
    EmailTaken,
    UsernameTaken,
    InvalidRole(String),
    NoProfileData,
    InvalidCredentials,
    UserNotFound(UserId),
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl AccountError {
    pub fn invalid_role(role: impl Into<String>) -> Self {
        AccountError::InvalidRole(role.into())
    }

    pub fn user_not_found(id: UserId) -> Self {
        AccountError::UserNotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::MissingCredentials => ErrorCode::EmptyField,
            AccountError::EmailTaken => ErrorCode::EmailTaken,
            AccountError::UsernameTaken => ErrorCode::UsernameTaken,
            AccountError::InvalidRole(_) | AccountError::ValidationFailed { .. } => {
                ErrorCode::ValidationFailed
            }
            AccountError::NoProfileData => ErrorCode::EmptyField,
            AccountError::InvalidCredentials => ErrorCode::Unauthorized,
            AccountError::UserNotFound(_) => ErrorCode::UserNotFound,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message for this error.
    pub fn message(&self) -> String {
        match self {
            AccountError::MissingCredentials => "Email and password are required".to_string(),
            AccountError::EmailTaken => "Email address already registered".to_string(),
            AccountError::UsernameTaken => "Username already taken".to_string(),
            AccountError::InvalidRole(_) => "Invalid role".to_string(),
            AccountError::NoProfileData => "No data provided".to_string(),
            AccountError::InvalidCredentials => "Invalid email or password".to_string(),
            AccountError::UserNotFound(id) => format!("User {} not found", id),
            AccountError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            AccountError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::EmailTaken => AccountError::EmailTaken,
            ErrorCode::UsernameTaken => AccountError::UsernameTaken,
            ErrorCode::ValidationFailed => {
                let field = err.details.get("field").cloned().unwrap_or_default();
                AccountError::validation(field, err.message)
            }
            _ => AccountError::infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for AccountError {
    fn from(err: ValidationError) -> Self {
        AccountError::validation(err.field().to_string(), err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_api_contract() {
        assert_eq!(
            AccountError::MissingCredentials.message(),
            "Email and password are required"
        );
        assert_eq!(AccountError::EmailTaken.message(), "Email address already registered");
        assert_eq!(AccountError::InvalidCredentials.message(), "Invalid email or password");
        assert_eq!(AccountError::UsernameTaken.message(), "Username already taken");
    }

    #[test]
    fn domain_conflicts_map_to_specific_variants() {
        let err = DomainError::new(ErrorCode::EmailTaken, "dup");
        assert_eq!(AccountError::from(err), AccountError::EmailTaken);
        let err = DomainError::new(ErrorCode::UsernameTaken, "dup");
        assert_eq!(AccountError::from(err), AccountError::UsernameTaken);
    }

    #[test]
    fn other_domain_errors_become_infrastructure() {
        let err = DomainError::database("connection reset");
        assert!(matches!(AccountError::from(err), AccountError::Infrastructure(_)));
    }
}
