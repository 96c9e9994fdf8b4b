//! Transaction ledger port.
//!
//! Append-only. The payment reference is unique, so a redelivered payment
//! event can never produce a second row.

use async_trait::async_trait;

use super::InsertOutcome;
use crate::domain::foundation::DomainError;
use crate::domain::monetization::{NewTransaction, Transaction};

#[async_trait]
pub trait TransactionLedger: Send + Sync {
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, DomainError>;

    /// Appends an entry; a duplicate reference resolves to the existing row.
    async fn append(
        &self,
        transaction: NewTransaction,
    ) -> Result<InsertOutcome<Transaction>, DomainError>;

    /// All entries, newest first.
    async fn list_all(&self) -> Result<Vec<Transaction>, DomainError>;
}
