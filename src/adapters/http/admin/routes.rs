//! Axum routes for operator endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    delete_content, get_user, list_content, list_payouts, list_transactions, list_users,
    process_payout, set_platform_fee,
};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/admin`. All routes require `X-Admin-Auth`.
///
/// - `GET /users`, `GET /user/:id`
/// - `GET /content`, `DELETE /content/:id`
/// - `GET /transactions`
/// - `GET /payouts`, `POST /payouts/process/:id`
/// - `POST /config/platform_fee`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/user/:id", get(get_user))
        .route("/content", get(list_content))
        .route("/content/:id", delete(delete_content))
        .route("/transactions", get(list_transactions))
        .route("/payouts", get(list_payouts))
        .route("/payouts/process/:id", post(process_payout))
        .route("/config/platform_fee", post(set_platform_fee))
}
