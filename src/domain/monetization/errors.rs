//! Monetization-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingRequestFields, MissingIntentFields, InvalidItem | 400 |
//! | InvalidSubscriptionType, NotPurchasable, PaymentMismatch | 400 |
//! | PayoutNotPending, InvalidFeePercentage, ValidationFailed | 400 |
//! | PaymentIncomplete | 402 |
//! | InvalidFan, InvalidCoach, IntentCreationFailed | 403 |
//! | ContentNotFound, UserNotFound, PayoutNotFound | 404 |
//! | PaymentProvider, Infrastructure | 500 |

use crate::domain::foundation::{
    ContentId, DomainError, ErrorCode, PayoutId, UserId, ValidationError,
};

use super::PayoutStatus;

/// Errors raised by entitlement, subscription, purchase, intent and payout operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MonetizationError {
    /// Required request fields were absent; carries the user-facing wording.
    MissingRequestFields(&'static str),

    /// Payment intent request lacked item id, item type or fan id.
    MissingIntentFields,

    /// Item type unknown or item id does not resolve to a price.
    InvalidItem,

    /// User is missing or does not hold the fan role.
    InvalidFan,

    /// User is missing or does not hold the coach role.
    InvalidCoach,

    InvalidSubscriptionType(String),

    /// Content exists but is free.
    NotPurchasable(ContentId),

    ContentNotFound(ContentId),

    UserNotFound(UserId),

    /// Processor reports the payment in some state other than succeeded.
    PaymentIncomplete { status: String },

    /// Processor record names a different fan, item or item type.
    PaymentMismatch,

    /// Processor could not be reached or rejected the lookup.
    PaymentProvider(String),

    /// Processor refused to create a payment intent.
    IntentCreationFailed(String),

    PayoutNotFound(PayoutId),

    PayoutNotPending { id: PayoutId, status: PayoutStatus },

    InvalidFeePercentage,

    ValidationFailed { field: String, message: String },

    Infrastructure(String),
}

impl MonetizationError {
    pub fn invalid_subscription_type(value: impl Into<String>) -> Self {
        MonetizationError::InvalidSubscriptionType(value.into())
    }

    pub fn payment_incomplete(status: impl Into<String>) -> Self {
        MonetizationError::PaymentIncomplete {
            status: status.into(),
        }
    }

    pub fn payment_provider(message: impl Into<String>) -> Self {
        MonetizationError::PaymentProvider(message.into())
    }

    pub fn intent_creation_failed(message: impl Into<String>) -> Self {
        MonetizationError::IntentCreationFailed(message.into())
    }

    pub fn payout_not_pending(id: PayoutId, status: PayoutStatus) -> Self {
        MonetizationError::PayoutNotPending { id, status }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MonetizationError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MonetizationError::MissingRequestFields(_) | MonetizationError::MissingIntentFields => {
                ErrorCode::EmptyField
            }
            MonetizationError::InvalidItem
            | MonetizationError::InvalidSubscriptionType(_)
            | MonetizationError::InvalidFeePercentage
            | MonetizationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MonetizationError::NotPurchasable(_) | MonetizationError::PayoutNotPending { .. } => {
                ErrorCode::InvalidStateTransition
            }
            MonetizationError::InvalidFan
            | MonetizationError::InvalidCoach
            | MonetizationError::IntentCreationFailed(_) => ErrorCode::Forbidden,
            MonetizationError::ContentNotFound(_) => ErrorCode::ContentNotFound,
            MonetizationError::UserNotFound(_) => ErrorCode::UserNotFound,
            MonetizationError::PayoutNotFound(_) => ErrorCode::PayoutNotFound,
            MonetizationError::PaymentIncomplete { .. } => ErrorCode::PaymentIncomplete,
            MonetizationError::PaymentMismatch => ErrorCode::PaymentMismatch,
            MonetizationError::PaymentProvider(_) => ErrorCode::PaymentProviderError,
            MonetizationError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message for this error.
    pub fn message(&self) -> String {
        match self {
            MonetizationError::MissingRequestFields(msg) => (*msg).to_string(),
            MonetizationError::MissingIntentFields => {
                "Missing item_id, item_type, or fan_id".to_string()
            }
            MonetizationError::InvalidItem => {
                "Invalid item_type or item_id for amount calculation".to_string()
            }
            MonetizationError::InvalidFan => "Invalid fan".to_string(),
            MonetizationError::InvalidCoach => "Invalid coach".to_string(),
            MonetizationError::InvalidSubscriptionType(_) => {
                "Invalid subscription type".to_string()
            }
            MonetizationError::NotPurchasable(_) => {
                "Content not for individual purchase or access already granted".to_string()
            }
            MonetizationError::ContentNotFound(_) => "Content not found".to_string(),
            MonetizationError::UserNotFound(_) => "User not found".to_string(),
            MonetizationError::PaymentIncomplete { .. } => {
                "Payment not successful or still processing".to_string()
            }
            MonetizationError::PaymentMismatch => {
                "Payment does not match this request".to_string()
            }
            MonetizationError::PaymentProvider(msg) => {
                format!("Payment processor error: {}", msg)
            }
            MonetizationError::IntentCreationFailed(msg) => msg.clone(),
            MonetizationError::PayoutNotFound(id) => format!("Payout {} not found", id),
            MonetizationError::PayoutNotPending { .. } => {
                "Payout not in pending state".to_string()
            }
            MonetizationError::InvalidFeePercentage => {
                "Invalid fee percentage. Must be between 0 and 100.".to_string()
            }
            MonetizationError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            MonetizationError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for MonetizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MonetizationError {}

impl From<DomainError> for MonetizationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => MonetizationError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::PaymentProviderError => MonetizationError::PaymentProvider(err.message),
            _ => MonetizationError::infrastructure(err.to_string()),
        }
    }
}

impl From<ValidationError> for MonetizationError {
    fn from(err: ValidationError) -> Self {
        MonetizationError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}
