//! Admin-specific error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | PayoutNotPending, InvalidFeePercentage | 400 |
//! | Unauthorized | 403 |
//! | UserNotFound, ContentNotFound, PayoutNotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{ContentId, DomainError, ErrorCode, PayoutId, UserId};
use crate::domain::monetization::MonetizationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// Credential missing or not recognised.
    Unauthorized,
    UserNotFound(UserId),
    ContentNotFound(ContentId),
    PayoutNotFound(PayoutId),
    PayoutNotPending(PayoutId),
    InvalidFeePercentage,
    Infrastructure(String),
}

impl AdminError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AdminError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AdminError::Unauthorized => ErrorCode::Forbidden,
            AdminError::UserNotFound(_) => ErrorCode::UserNotFound,
            AdminError::ContentNotFound(_) => ErrorCode::ContentNotFound,
            AdminError::PayoutNotFound(_) => ErrorCode::PayoutNotFound,
            AdminError::PayoutNotPending(_) => ErrorCode::InvalidStateTransition,
            AdminError::InvalidFeePercentage => ErrorCode::ValidationFailed,
            AdminError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            AdminError::Unauthorized => "Admin access required".to_string(),
            AdminError::UserNotFound(id) => format!("User {} not found", id),
            AdminError::ContentNotFound(id) => format!("Content {} not found", id),
            AdminError::PayoutNotFound(id) => format!("Payout {} not found", id),
            AdminError::PayoutNotPending(_) => "Payout not in pending state".to_string(),
            AdminError::InvalidFeePercentage => {
                "Invalid fee percentage. Must be between 0 and 100.".to_string()
            }
            AdminError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for AdminError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AdminError {}

impl From<DomainError> for AdminError {
    fn from(err: DomainError) -> Self {
        AdminError::infrastructure(err.to_string())
    }
}

impl From<MonetizationError> for AdminError {
    fn from(err: MonetizationError) -> Self {
        match err {
            MonetizationError::PayoutNotFound(id) => AdminError::PayoutNotFound(id),
            MonetizationError::PayoutNotPending { id, .. } => AdminError::PayoutNotPending(id),
            MonetizationError::InvalidFeePercentage => AdminError::InvalidFeePercentage,
            MonetizationError::ContentNotFound(id) => AdminError::ContentNotFound(id),
            other => AdminError::infrastructure(other.message()),
        }
    }
}
