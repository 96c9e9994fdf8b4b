//! Integration tests for the HTTP API.
//!
//! Each test builds a fresh router over in-memory stores and a scripted
//! payment processor, then drives it through `tower::ServiceExt::oneshot`:
//! 1. Accounts register and log in
//! 2. Paywalled content is gated on entitlement, on both the access check
//!    and the content route
//! 3. Payment confirmation creates grants idempotently
//! 4. Webhooks reconcile charges into the fee-split ledger
//! 5. Operator endpoints sit behind the admin key

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use creator_pay::adapters::auth::{BcryptPasswordHasher, SharedKeyAdminAuthorizer};
use creator_pay::adapters::http::{api_router, AppState};
use creator_pay::adapters::memory::{
    InMemoryContentCatalog, InMemoryPayoutRepository, InMemoryPurchaseRepository,
    InMemorySubscriptionRepository, InMemoryTransactionLedger, InMemoryUserDirectory,
};
use creator_pay::adapters::storage::LocalBlobStore;
use creator_pay::adapters::stripe::MockPaymentProcessor;
use creator_pay::domain::foundation::{Currency, Timestamp, UserId};
use creator_pay::domain::monetization::{
    signature_header_for, ItemType, NewSubscription, PaymentMetadata, PlatformFeeSetting,
    PriceList, SubscriptionPlan, WebhookVerifier,
};
use creator_pay::ports::{SubscriptionRepository, TransactionLedger};

// =============================================================================
// Test Infrastructure
// =============================================================================

const ADMIN_KEY: &str = "integration-admin-key-abcdef012345";
const WEBHOOK_SECRET: &str = "whsec_integration_secret";

struct TestApp {
    router: Router,
    processor: MockPaymentProcessor,
    subscriptions: Arc<InMemorySubscriptionRepository>,
    ledger: Arc<InMemoryTransactionLedger>,
    _uploads: tempfile::TempDir,
}

impl TestApp {
    fn new() -> Self {
        let uploads = tempfile::tempdir().unwrap();
        let processor = MockPaymentProcessor::new();
        let subscriptions = Arc::new(InMemorySubscriptionRepository::new());
        let ledger = Arc::new(InMemoryTransactionLedger::new());

        let state = AppState {
            users: Arc::new(InMemoryUserDirectory::new()),
            catalog: Arc::new(InMemoryContentCatalog::new()),
            subscriptions: subscriptions.clone(),
            purchases: Arc::new(InMemoryPurchaseRepository::new()),
            ledger: ledger.clone(),
            payouts: Arc::new(InMemoryPayoutRepository::new()),
            processor: Arc::new(processor.clone()),
            password_hasher: Arc::new(BcryptPasswordHasher::new(4)),
            blobs: Arc::new(LocalBlobStore::new(uploads.path().to_path_buf(), "/uploads")),
            admin_authorizer: Arc::new(SharedKeyAdminAuthorizer::new([SecretString::new(
                ADMIN_KEY.to_string(),
            )])),
            webhook_verifier: Arc::new(WebhookVerifier::new(SecretString::new(
                WEBHOOK_SECRET.to_string(),
            ))),
            platform_fee: PlatformFeeSetting::default(),
            prices: PriceList::default(),
            default_currency: Currency::usd(),
        };

        Self {
            router: api_router(1024 * 1024).with_state(state),
            processor,
            subscriptions,
            ledger,
            _uploads: uploads,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(json_request(Method::POST, uri, body)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn admin_get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::get(uri)
                .header("X-Admin-Auth", ADMIN_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    async fn admin_delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::delete(uri)
                .header("X-Admin-Auth", ADMIN_KEY)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Registers and logs in, returning the new user's id.
    async fn register(&self, email: &str, role: &str) -> i64 {
        let (status, _) = self
            .post_json(
                "/api/user/register",
                json!({"email": email, "password": "correct horse", "role": role}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = self
            .post_json(
                "/api/user/login",
                json!({"email": email, "password": "correct horse"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["user_id"].as_i64().unwrap()
    }

    async fn upload_text(&self, coach_id: i64, access_setting: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/content/upload",
                json!({
                    "coach_id": coach_id,
                    "title": "Morning mobility",
                    "content_type": "text",
                    "access_setting": access_setting,
                    "text_content": "Ten minutes, every day."
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body["content_id"].as_i64().unwrap()
    }

    async fn check_access(&self, fan_id: i64, content_id: i64) -> (StatusCode, Value) {
        self.get(&format!(
            "/api/monetization/check_access/{}/{}",
            fan_id, content_id
        ))
        .await
    }

    async fn deliver_webhook(&self, payload: &[u8], signature: &str) -> (StatusCode, Value) {
        self.send(
            Request::post("/api/monetization/stripe_webhook")
                .header("Content-Type", "application/json")
                .header("Stripe-Signature", signature)
                .body(Body::from(payload.to_vec()))
                .unwrap(),
        )
        .await
    }
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn succeeded_event(intent_id: &str, amount: i64, item_type: &str, item_id: i64, fan_id: i64) -> Vec<u8> {
    json!({
        "id": format!("evt_{}", intent_id),
        "type": "payment_intent.succeeded",
        "created": Timestamp::now().as_unix_secs(),
        "data": {
            "object": {
                "id": intent_id,
                "amount": amount,
                "currency": "usd",
                "status": "succeeded",
                "metadata": {
                    "item_id": item_id.to_string(),
                    "item_type": item_type,
                    "user_id": fan_id.to_string()
                }
            }
        }
    })
    .to_string()
    .into_bytes()
}

fn sign(payload: &[u8]) -> String {
    signature_header_for(WEBHOOK_SECRET, Timestamp::now().as_unix_secs(), payload).unwrap()
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn registered_user_can_log_in_and_read_profile() {
    let app = TestApp::new();
    let id = app.register("fan@example.com", "fan").await;

    let (status, body) = app.get(&format!("/api/profile/{}", id)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "fan@example.com");
    assert_eq!(body["role"], "fan");
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = TestApp::new();
    app.register("fan@example.com", "fan").await;

    let (status, body) = app
        .post_json(
            "/api/user/login",
            json!({"email": "fan@example.com", "password": "wrong"}),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());
}

// =============================================================================
// Access Gate
// =============================================================================

#[tokio::test]
async fn paywalled_content_is_denied_without_entitlement() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;

    let (status, body) = app.check_access(fan, content).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["access"], false);
    assert_eq!(body["reason"], "No active subscription or purchase");
}

#[tokio::test]
async fn free_content_is_open_to_any_fan() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "free").await;

    let (status, body) = app.check_access(fan, content).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["access"], true);
}

#[tokio::test]
async fn expired_subscription_still_flagged_active_is_denied() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;

    let long_ago = Timestamp::now().add_days(-60);
    app.subscriptions
        .insert_active(NewSubscription::starting(
            UserId::from_raw(fan),
            UserId::from_raw(coach),
            SubscriptionPlan::Monthly,
            long_ago,
            Some("pi_expired".to_string()),
        ))
        .await
        .unwrap();

    let (status, body) = app.check_access(fan, content).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["access"], false);
}

// =============================================================================
// Content Route
// =============================================================================

#[tokio::test]
async fn content_route_denies_paywalled_item_with_reason() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;

    let (status, body) = app
        .get(&format!("/api/content/{}?fan_id={}", content, fan))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
    assert_eq!(body["reason"], "No active subscription or purchase");
    assert!(body.get("text_content").is_none());
}

#[tokio::test]
async fn blank_fan_id_is_treated_as_anonymous() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let free = app.upload_text(coach, "free").await;
    let paywalled = app.upload_text(coach, "paywall").await;

    let (status, body) = app.get(&format!("/api/content/{}?fan_id=", free)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], free);

    let (status, body) = app.get(&format!("/api/content/{}?fan_id=", paywalled)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied");
}

#[tokio::test]
async fn form_encoded_upload_is_accepted() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let form = format!(
        "coach_id={}&title=Evening+stretch&content_type=text&access_setting=free&text_content=Hold+each+for+thirty+seconds",
        coach
    );

    let (status, body) = app
        .send(
            Request::post("/api/content/upload")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(form))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let content = body["content_id"].as_i64().unwrap();
    let (status, body) = app.get(&format!("/api/content/{}", content)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Evening stretch");
    assert_eq!(body["text_content"], "Hold each for thirty seconds");
}

#[tokio::test]
async fn malformed_json_upload_is_a_validation_failure() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Request::post("/api/content/upload")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"coach_id\": 2, \"title\": "))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

// =============================================================================
// Payment Confirmation
// =============================================================================

#[tokio::test]
async fn incomplete_payment_is_refused_with_402() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    app.processor.add_intent(MockPaymentProcessor::with_status(
        "pi_pending",
        "requires_action",
        1_000,
        PaymentMetadata::for_item(coach, ItemType::SubscriptionMonthly, UserId::from_raw(fan)),
    ));

    let (status, body) = app
        .post_json(
            "/api/monetization/subscribe",
            json!({
                "fan_id": fan,
                "coach_id": coach,
                "subscription_type": "monthly",
                "payment_intent_id": "pi_pending"
            }),
        )
        .await;

    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(body["error"], "Payment not successful or still processing");
}

#[tokio::test]
async fn repeated_subscribe_returns_the_same_subscription() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;
    app.processor.add_intent(MockPaymentProcessor::succeeded(
        "pi_sub",
        1_000,
        PaymentMetadata::for_item(coach, ItemType::SubscriptionMonthly, UserId::from_raw(fan)),
    ));
    let request = json!({
        "fan_id": fan,
        "coach_id": coach,
        "subscription_type": "monthly",
        "payment_intent_id": "pi_sub"
    });

    let (first_status, first) = app
        .post_json("/api/monetization/subscribe", request.clone())
        .await;
    let (second_status, second) = app.post_json("/api/monetization/subscribe", request).await;

    assert_eq!(first_status, StatusCode::CREATED);
    assert_eq!(second_status, StatusCode::OK);
    assert_eq!(first["subscription_id"], second["subscription_id"]);

    let (status, body) = app.check_access(fan, content).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "Active subscription to coach");
}

#[tokio::test]
async fn purchase_grants_access_to_that_item() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;
    app.processor.add_intent(MockPaymentProcessor::succeeded(
        "pi_ppv",
        500,
        PaymentMetadata::for_item(content, ItemType::ContentPpv, UserId::from_raw(fan)),
    ));

    let (status, _) = app
        .post_json(
            "/api/monetization/purchase_content",
            json!({"fan_id": fan, "content_id": content, "payment_intent_id": "pi_ppv"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.check_access(fan, content).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reason"], "Content purchased (pay-per-view)");
}

#[tokio::test]
async fn one_payment_cannot_buy_two_items() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let first = app.upload_text(coach, "paywall").await;
    let second = app.upload_text(coach, "paywall").await;
    app.processor.add_intent(MockPaymentProcessor::succeeded(
        "pi_once",
        500,
        PaymentMetadata::default(),
    ));

    let (status, _) = app
        .post_json(
            "/api/monetization/purchase_content",
            json!({"fan_id": fan, "content_id": first, "payment_intent_id": "pi_once"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post_json(
            "/api/monetization/purchase_content",
            json!({"fan_id": fan, "content_id": second, "payment_intent_id": "pi_once"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "PAYMENT_MISMATCH");

    let (status, _) = app.check_access(fan, second).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Webhooks
// =============================================================================

#[tokio::test]
async fn succeeded_payment_is_split_fifteen_eighty_five() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let payload = succeeded_event("pi_split", 10_000, "subscription_monthly", coach, fan);

    let (status, body) = app.deliver_webhook(&payload, &sign(&payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app.admin_get("/api/admin/transactions").await;
    assert_eq!(status, StatusCode::OK);
    let transactions = body.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["amount_minor"], 10_000);
    assert_eq!(transactions[0]["platform_fee_minor"], 1_500);
    assert_eq!(transactions[0]["net_amount_minor"], 8_500);
    assert_eq!(transactions[0]["amount"], 100.0);
    assert_eq!(transactions[0]["transaction_type"], "subscription_payment");
    assert_eq!(transactions[0]["stripe_payment_intent_id"], "pi_split");
}

#[tokio::test]
async fn redelivered_webhook_records_one_transaction() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let payload = succeeded_event("pi_twice", 1_000, "subscription_monthly", coach, fan);

    let (first, _) = app.deliver_webhook(&payload, &sign(&payload)).await;
    let (second, _) = app.deliver_webhook(&payload, &sign(&payload)).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);
    assert_eq!(app.ledger.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn webhook_with_bad_signature_is_rejected_and_not_recorded() {
    let app = TestApp::new();
    let payload = succeeded_event("pi_forged", 1_000, "content_ppv", 1, 2);
    let forged = signature_header_for("whsec_wrong", Timestamp::now().as_unix_secs(), &payload)
        .unwrap();

    let (status, body) = app.deliver_webhook(&payload, &forged).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_WEBHOOK_SIGNATURE");
    assert!(app
        .ledger
        .find_by_payment_reference("pi_forged")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn payment_for_deleted_content_keeps_its_content_id() {
    let app = TestApp::new();
    let coach = app.register("coach@example.com", "coach").await;
    let fan = app.register("fan@example.com", "fan").await;
    let content = app.upload_text(coach, "paywall").await;
    let (status, _) = app.admin_delete(&format!("/api/admin/content/{}", content)).await;
    assert_eq!(status, StatusCode::OK);

    let payload = succeeded_event("pi_orphan", 500, "content_ppv", content, fan);
    let (status, _) = app.deliver_webhook(&payload, &sign(&payload)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.admin_get("/api/admin/transactions").await;
    let transactions = body.as_array().unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0]["content_id"], content);
    assert_eq!(transactions[0]["user_id"], fan);
    assert_eq!(transactions[0]["transaction_type"], "ppv_purchase");
    assert!(transactions[0]["purchase_id"].is_null());
}

// =============================================================================
// Admin Gate
// =============================================================================

#[tokio::test]
async fn admin_routes_require_the_admin_key() {
    let app = TestApp::new();
    app.register("fan@example.com", "fan").await;

    let (status, _) = app.get("/api/admin/users").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Request::get("/api/admin/users")
                .header("X-Admin-Auth", "not-the-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app.admin_get("/api/admin/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_can_change_the_platform_fee() {
    let app = TestApp::new();

    let (status, body) = app
        .send(
            Request::post("/api/admin/config/platform_fee")
                .header("Content-Type", "application/json")
                .header("X-Admin-Auth", ADMIN_KEY)
                .body(Body::from(json!({"fee_percentage": 20.0}).to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fee_percentage"], 20.0);
}
