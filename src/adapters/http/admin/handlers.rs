//! HTTP handlers for operator endpoints.
//!
//! Every handler takes `RequireAdmin`; a request without a valid
//! `X-Admin-Auth` credential never reaches the application layer.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::account::dto::ProfileResponse;
use crate::adapters::http::content::dto::ContentSummaryResponse;
use crate::adapters::http::error::{ErrorResponse, MessageResponse};
use crate::adapters::http::middleware::RequireAdmin;
use crate::adapters::http::state::AppState;
use crate::application::handlers::admin::{
    DeleteContentCommand, GetUserQuery, SetPlatformFeeCommand,
};
use crate::application::handlers::payout::MarkPayoutProcessingCommand;
use crate::domain::admin::AdminError;
use crate::domain::foundation::{ContentId, DomainError, PayoutId, UserId};
use crate::domain::monetization::MonetizationError;

use super::dto::{
    PayoutResponse, PlatformFeeResponse, ProcessPayoutResponse, SetPlatformFeeRequest,
    TransactionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Users and Content
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let users = state.list_users_handler().handle(&admin).await?;
    let response: Vec<ProfileResponse> = users.into_iter().map(ProfileResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/admin/user/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AdminApiError> {
    let query = GetUserQuery {
        user_id: UserId::from_raw(user_id),
    };
    let user = state.get_user_handler().handle(&admin, query).await?;
    Ok(Json(ProfileResponse::from(user)))
}

/// GET /api/admin/content
pub async fn list_content(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let items = state.list_all_content_handler().handle(&admin).await?;
    let response: Vec<ContentSummaryResponse> =
        items.into_iter().map(ContentSummaryResponse::from).collect();
    Ok(Json(response))
}

/// DELETE /api/admin/content/{id}
pub async fn delete_content(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(content_id): Path<i64>,
) -> Result<impl IntoResponse, AdminApiError> {
    let content_id = ContentId::from_raw(content_id);
    state
        .delete_content_handler()
        .handle(&admin, DeleteContentCommand { content_id })
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "Content item {} deleted",
        content_id
    ))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Ledgers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/admin/transactions
pub async fn list_transactions(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let rows = state.list_transactions_handler().handle(&admin).await?;
    let response: Vec<TransactionResponse> =
        rows.into_iter().map(TransactionResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/admin/payouts
pub async fn list_payouts(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> Result<impl IntoResponse, AdminApiError> {
    let rows = state.list_payouts_handler().handle(&admin).await?;
    let response: Vec<PayoutResponse> = rows.into_iter().map(PayoutResponse::from).collect();
    Ok(Json(response))
}

/// POST /api/admin/payouts/process/{id}
pub async fn process_payout(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(payout_id): Path<i64>,
) -> Result<impl IntoResponse, AdminApiError> {
    let payout_id = PayoutId::from_raw(payout_id);
    let result = state
        .mark_payout_processing_handler()
        .handle(&admin, MarkPayoutProcessingCommand { payout_id })
        .await?;

    Ok(Json(ProcessPayoutResponse {
        message: format!("Payout {} marked as processing", payout_id),
        payout_status: result.payout.status.as_str().to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Configuration
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/admin/config/platform_fee
pub async fn set_platform_fee(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    request: Option<Json<SetPlatformFeeRequest>>,
) -> Result<impl IntoResponse, AdminApiError> {
    let percentage = request
        .and_then(|Json(r)| r.fee_percentage)
        .ok_or(AdminError::InvalidFeePercentage)?;

    let result = state
        .set_platform_fee_handler()
        .handle(&admin, SetPlatformFeeCommand { percentage })?;

    Ok(Json(PlatformFeeResponse {
        message: format!("Platform fee set to {}%", result.current.as_percentage()),
        previous_percentage: result.previous.as_percentage(),
        fee_percentage: result.current.as_percentage(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts admin errors to HTTP responses.
#[derive(Debug)]
pub struct AdminApiError(AdminError);

impl From<AdminError> for AdminApiError {
    fn from(err: AdminError) -> Self {
        Self(err)
    }
}

impl From<MonetizationError> for AdminApiError {
    fn from(err: MonetizationError) -> Self {
        Self(AdminError::from(err))
    }
}

impl From<DomainError> for AdminApiError {
    fn from(err: DomainError) -> Self {
        Self(AdminError::from(err))
    }
}

impl AdminApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AdminError::PayoutNotPending(_) | AdminError::InvalidFeePercentage => {
                StatusCode::BAD_REQUEST
            }
            AdminError::Unauthorized => StatusCode::FORBIDDEN,
            AdminError::UserNotFound(_)
            | AdminError::ContentNotFound(_)
            | AdminError::PayoutNotFound(_) => StatusCode::NOT_FOUND,
            AdminError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        ErrorResponse::new(self.0.code(), self.0.message()).into_response_with(status)
    }
}
