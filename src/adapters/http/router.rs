//! Top-level API router.

use axum::Router;

use super::account::{profile_routes, user_routes};
use super::admin::admin_routes;
use super::content::content_routes;
use super::monetization::monetization_routes;
use super::state::AppState;

/// Every route, mounted under `/api`.
///
/// ```ignore
/// let app = api_router(config.storage.max_upload_bytes).with_state(state);
/// ```
pub fn api_router(max_upload_bytes: usize) -> Router<AppState> {
    let api = Router::new()
        .nest("/user", user_routes())
        .nest("/profile", profile_routes())
        .nest("/content", content_routes(max_upload_bytes))
        .nest("/monetization", monetization_routes())
        .nest("/admin", admin_routes());

    Router::new().nest("/api", api)
}
