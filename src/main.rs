//! creator-pay server.
//!
//! Loads configuration from the environment, wires adapters into the shared
//! `AppState` and serves the API until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::{header, HeaderName, HeaderValue, Method};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use creator_pay::adapters::auth::{BcryptPasswordHasher, SharedKeyAdminAuthorizer};
use creator_pay::adapters::http::{api_router, AppState};
use creator_pay::adapters::memory::{
    InMemoryContentCatalog, InMemoryPayoutRepository, InMemoryPurchaseRepository,
    InMemorySubscriptionRepository, InMemoryTransactionLedger, InMemoryUserDirectory,
};
use creator_pay::adapters::postgres::{
    self, PostgresContentCatalog, PostgresPayoutRepository, PostgresPurchaseRepository,
    PostgresSubscriptionRepository, PostgresTransactionLedger, PostgresUserDirectory,
};
use creator_pay::adapters::storage::LocalBlobStore;
use creator_pay::adapters::stripe::{StripeConfig, StripePaymentProcessor};
use creator_pay::config::{AppConfig, DatabaseConfig, ServerConfig};
use creator_pay::domain::monetization::{PlatformFeeSetting, WebhookVerifier};
use creator_pay::ports::{
    ContentCatalog, PayoutRepository, PurchaseRepository, SubscriptionRepository,
    TransactionLedger, UserDirectory,
};

const FALLBACK_LOG_FILTER: &str = "info";

/// `HeaderName::from_static` only accepts lowercase names.
const ADMIN_HEADER_LOWER: &str = "x-admin-auth";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "Starting creator-pay"
    );

    let state = build_state(&config).await?;
    let app = build_app(&config, state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON lines in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&server.log_level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_LOG_FILTER));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wiring
// ════════════════════════════════════════════════════════════════════════════════

struct Stores {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    ledger: Arc<dyn TransactionLedger>,
    payouts: Arc<dyn PayoutRepository>,
}

async fn build_stores(config: &DatabaseConfig) -> anyhow::Result<Stores> {
    if !config.is_configured() {
        tracing::warn!("No database configured; using in-memory stores");
        return Ok(Stores {
            users: Arc::new(InMemoryUserDirectory::new()),
            catalog: Arc::new(InMemoryContentCatalog::new()),
            subscriptions: Arc::new(InMemorySubscriptionRepository::new()),
            purchases: Arc::new(InMemoryPurchaseRepository::new()),
            ledger: Arc::new(InMemoryTransactionLedger::new()),
            payouts: Arc::new(InMemoryPayoutRepository::new()),
        });
    }

    let pool = postgres::connect(config).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "Database pool ready"
    );

    Ok(Stores {
        users: Arc::new(PostgresUserDirectory::new(pool.clone())),
        catalog: Arc::new(PostgresContentCatalog::new(pool.clone())),
        subscriptions: Arc::new(PostgresSubscriptionRepository::new(pool.clone())),
        purchases: Arc::new(PostgresPurchaseRepository::new(pool.clone())),
        ledger: Arc::new(PostgresTransactionLedger::new(pool.clone())),
        payouts: Arc::new(PostgresPayoutRepository::new(pool)),
    })
}

async fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let stores = build_stores(&config.database).await?;

    let mut stripe = StripeConfig::new(config.payment.stripe_api_key.clone());
    if let Some(base_url) = &config.payment.stripe_api_base_url {
        stripe = stripe.with_base_url(base_url.clone());
    }

    let admin_authorizer = SharedKeyAdminAuthorizer::new(config.admin.keys());
    tracing::info!(admin_keys = admin_authorizer.key_count(), "Admin gate configured");

    std::fs::create_dir_all(&config.storage.upload_dir)?;

    Ok(AppState {
        users: stores.users,
        catalog: stores.catalog,
        subscriptions: stores.subscriptions,
        purchases: stores.purchases,
        ledger: stores.ledger,
        payouts: stores.payouts,
        processor: Arc::new(StripePaymentProcessor::new(stripe)),
        password_hasher: Arc::new(BcryptPasswordHasher::default()),
        blobs: Arc::new(LocalBlobStore::new(
            config.storage.upload_dir.clone(),
            config.storage.public_base_url.clone(),
        )),
        admin_authorizer: Arc::new(admin_authorizer),
        webhook_verifier: Arc::new(WebhookVerifier::new(
            config.payment.stripe_webhook_secret.clone(),
        )),
        platform_fee: PlatformFeeSetting::new(config.payment.fee_rate()?),
        prices: config.payment.prices,
        default_currency: config.payment.default_currency()?,
    })
}

fn build_app(config: &AppConfig, state: AppState) -> Router {
    let mut app = api_router(config.storage.max_upload_bytes).with_state(state);

    // Stored files are served locally only when their URLs are local paths
    let public_base = config.storage.public_base_url.trim_end_matches('/');
    if public_base.starts_with('/') {
        app = app.nest_service(public_base, ServeDir::new(&config.storage.upload_dir));
    }

    app.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.server.request_timeout_secs,
            )))
            .layer(CompressionLayer::new()),
    )
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return if server.is_production() {
            CorsLayer::new()
        } else {
            CorsLayer::permissive()
        };
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ADMIN_HEADER_LOWER),
        ])
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
