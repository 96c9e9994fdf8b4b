//! Axum routes for monetization.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_access, create_payment_intent, purchase_content, stripe_webhook, subscribe,
};
use crate::adapters::http::state::AppState;

/// Mounted at `/api/monetization`.
///
/// - `POST /create_payment_intent`
/// - `POST /subscribe`
/// - `POST /purchase_content`
/// - `POST /stripe_webhook` - no caller auth, signature verified
/// - `GET /check_access/:fan_id/:content_id`
pub fn monetization_routes() -> Router<AppState> {
    Router::new()
        .route("/create_payment_intent", post(create_payment_intent))
        .route("/subscribe", post(subscribe))
        .route("/purchase_content", post(purchase_content))
        .route("/stripe_webhook", post(stripe_webhook))
        .route("/check_access/:fan_id/:content_id", get(check_access))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::http::state::test_state::test_state;

    #[test]
    fn routes_build_with_state() {
        let _: Router<()> = monetization_routes().with_state(test_state());
    }
}
