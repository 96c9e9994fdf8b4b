//! Error body shared by every endpoint.
//!
//! ```json
//! { "error": "Access denied", "error_code": "FORBIDDEN", "reason": "No active subscription or purchase" }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Entitlement reason, present only when an access decision was involved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ErrorResponse {
    pub fn new(error_code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            error_code: error_code.to_string(),
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error_code = %self.error_code, error = %self.error, "Request failed");
        }
        (status, Json(self)).into_response()
    }
}

/// Message-only success body used by command endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
