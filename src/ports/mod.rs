//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Stores
//!
//! - `UserDirectory` - accounts and profiles
//! - `ContentCatalog` - content metadata and bodies
//! - `SubscriptionRepository`, `PurchaseRepository` - entitlement grants
//! - `TransactionLedger` - append-only financial records
//! - `PayoutRepository` - coach payout state
//!
//! ## External Services
//!
//! - `PaymentProcessor` - payment intents
//! - `AdminAuthorizer` - operator capability
//! - `PasswordHasher` - credential hashing
//! - `BlobStore` - uploaded file storage

mod admin_authorizer;
mod blob_store;
mod content_catalog;
mod insert_outcome;
mod password_hasher;
mod payment_processor;
mod payout_repository;
mod purchase_repository;
mod subscription_repository;
mod transaction_ledger;
mod user_directory;

pub use admin_authorizer::AdminAuthorizer;
pub use blob_store::{BlobStore, StoredBlob};
pub use content_catalog::ContentCatalog;
pub use insert_outcome::InsertOutcome;
pub use password_hasher::PasswordHasher;
pub use payment_processor::{PaymentError, PaymentErrorCode, PaymentProcessor};
pub use payout_repository::PayoutRepository;
pub use purchase_repository::PurchaseRepository;
pub use subscription_repository::SubscriptionRepository;
pub use transaction_ledger::TransactionLedger;
pub use user_directory::UserDirectory;
