//! Payment webhook error types.
//!
//! Status codes drive the processor's redelivery: 4xx is final, 5xx is retried.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that occur while reconciling a payment event.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature missing or not produced with our signing secret.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Signed more than five minutes ago.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Signed too far in the future.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Header or payload could not be parsed.
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// Store failure; safe to redeliver.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the processor should redeliver this event.
    pub fn is_retryable(&self) -> bool {
        matches!(self, WebhookError::Database(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::InvalidSignature
            | WebhookError::TimestampOutOfRange
            | WebhookError::InvalidTimestamp
            | WebhookError::ParseError(_)
            | WebhookError::MissingField(_) => StatusCode::BAD_REQUEST,
            WebhookError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True for authenticity failures, as opposed to malformed content.
    pub fn is_signature_failure(&self) -> bool {
        matches!(
            self,
            WebhookError::InvalidSignature
                | WebhookError::TimestampOutOfRange
                | WebhookError::InvalidTimestamp
        )
    }
}
