//! In-memory adapters.
//!
//! Hold state behind `tokio::sync::RwLock` and enforce the same uniqueness
//! rules as the Postgres schema. Used by tests and by the dev server when no
//! database is configured.

mod content_catalog;
mod payout_repository;
mod purchase_repository;
mod subscription_repository;
mod transaction_ledger;
mod user_directory;

pub use content_catalog::InMemoryContentCatalog;
pub use payout_repository::InMemoryPayoutRepository;
pub use purchase_repository::InMemoryPurchaseRepository;
pub use subscription_repository::InMemorySubscriptionRepository;
pub use transaction_ledger::InMemoryTransactionLedger;
pub use user_directory::InMemoryUserDirectory;
