//! Axum routes for accounts and profiles.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{get_profile, login, register, update_profile};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/user`.
///
/// - `POST /register`
/// - `POST /login`
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Mounted at `/api/profile`.
///
/// - `GET /:id`
/// - `PUT /:id`
pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/:id", get(get_profile).put(update_profile))
}
