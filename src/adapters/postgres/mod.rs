//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresUserDirectory` - accounts and profiles
//! - `PostgresContentCatalog` - content metadata and bodies
//! - `PostgresSubscriptionRepository`, `PostgresPurchaseRepository` - grants
//! - `PostgresTransactionLedger` - append-only ledger
//! - `PostgresPayoutRepository` - payout state
//!
//! Idempotent inserts use `ON CONFLICT DO NOTHING` and read back the row that
//! holds the unique key, so concurrent writers converge on one record.

mod content_catalog;
mod payout_repository;
mod purchase_repository;
mod subscription_repository;
mod transaction_ledger;
mod user_directory;

pub use content_catalog::PostgresContentCatalog;
pub use payout_repository::PostgresPayoutRepository;
pub use purchase_repository::PostgresPurchaseRepository;
pub use subscription_repository::PostgresSubscriptionRepository;
pub use transaction_ledger::PostgresTransactionLedger;
pub use user_directory::PostgresUserDirectory;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::{Currency, DomainError, ErrorCode, Money};

/// Opens the pool and, when enabled, applies pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .connect(&config.url)
        .await?;

    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(pool)
}

fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}

fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.constraint() == Some(constraint))
}

fn corrupt(column: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value in database: {}", column, err),
    )
}

fn money_from_row(minor: i64, currency: &str) -> Result<Money, DomainError> {
    let currency = Currency::new(currency).map_err(|e| corrupt("currency", e))?;
    Money::from_minor(minor, currency).map_err(|e| corrupt("amount", e))
}
