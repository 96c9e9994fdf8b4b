//! Admin gate for axum.
//!
//! `RequireAdmin` reads the `X-Admin-Auth` header and asks the configured
//! `AdminAuthorizer` for a capability. Handlers receive the capability and
//! pass it to the admin operations, which cannot be called without one.
//!
//! ```ignore
//! async fn list_users(
//!     State(state): State<AppState>,
//!     RequireAdmin(admin): RequireAdmin,
//! ) -> impl IntoResponse { /* ... */ }
//! ```

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::domain::admin::{AdminCapability, AdminCredential, AdminError};

/// Header carrying the admin credential.
pub const ADMIN_AUTH_HEADER: &str = "X-Admin-Auth";

/// Extractor that requires a valid admin credential.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AdminCapability);

/// Rejection for `RequireAdmin`.
#[derive(Debug)]
pub struct AdminRejection(AdminError);

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AdminError::Unauthorized => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ErrorResponse::new(self.0.code(), self.0.message()).into_response_with(status)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credential = parts
            .headers
            .get(ADMIN_AUTH_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(AdminCredential::new);

        state
            .admin_authorizer
            .authorize(credential.as_ref())
            .await
            .map(RequireAdmin)
            .map_err(AdminRejection)
    }
}
