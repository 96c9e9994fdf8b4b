//! Axum routes for content.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{get_content, list_coach_content, upload_content};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/content`.
///
/// - `POST /upload` - body limited to `max_upload_bytes`
/// - `GET /:id?fan_id=`
/// - `GET /coach/:coach_id`
pub fn content_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/upload",
            post(upload_content).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/:id", get(get_content))
        .route("/coach/:coach_id", get(list_coach_content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_state::test_state;

    #[test]
    fn routes_build_with_state() {
        let _: Router<()> = content_routes(1024).with_state(test_state());
    }
}
