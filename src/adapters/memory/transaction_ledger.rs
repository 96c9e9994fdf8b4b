//! In-memory transaction ledger.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, TransactionId};
use crate::domain::monetization::{NewTransaction, Transaction};
use crate::ports::{InsertOutcome, TransactionLedger};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionLedger {
    rows: Arc<RwLock<Vec<Transaction>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryTransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `append` fail with a database error until cleared.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionLedger for InMemoryTransactionLedger {
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Transaction>, DomainError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .find(|t| t.payment_reference == reference)
            .cloned())
    }

    async fn append(
        &self,
        transaction: NewTransaction,
    ) -> Result<InsertOutcome<Transaction>, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::database("ledger unavailable"));
        }
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows
            .iter()
            .find(|t| t.payment_reference == transaction.payment_reference)
        {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        let row = Transaction {
            id: TransactionId::from_raw(rows.len() as i64 + 1),
            transaction_type: transaction.transaction_type,
            fan_id: transaction.fan_id,
            coach_id: transaction.coach_id,
            content_id: transaction.content_id,
            subscription_id: transaction.subscription_id,
            purchase_id: transaction.purchase_id,
            gross: transaction.gross,
            platform_fee: transaction.platform_fee,
            net: transaction.net,
            payment_reference: transaction.payment_reference,
            status: transaction.status,
            created_at: transaction.created_at,
        };
        rows.push(row.clone());
        Ok(InsertOutcome::Inserted(row))
    }

    async fn list_all(&self) -> Result<Vec<Transaction>, DomainError> {
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Currency, Money, Timestamp};
    use crate::domain::monetization::{FeeRate, FeeSplit, TransactionType};

    fn entry(reference: &str) -> NewTransaction {
        let gross = Money::from_minor(1_000, Currency::usd()).unwrap();
        NewTransaction::succeeded_payment(
            TransactionType::PpvPurchase,
            FeeSplit::compute(gross, FeeRate::default()),
            reference,
            Timestamp::now(),
        )
    }

    #[tokio::test]
    async fn duplicate_reference_is_not_appended() {
        let ledger = InMemoryTransactionLedger::new();
        assert!(ledger.append(entry("pi_1")).await.unwrap().is_inserted());
        assert!(!ledger.append(entry("pi_1")).await.unwrap().is_inserted());
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn failing_mode_returns_database_error() {
        let ledger = InMemoryTransactionLedger::new();
        ledger.set_fail_writes(true);
        assert!(ledger.append(entry("pi_1")).await.is_err());
        assert!(ledger.is_empty().await);
    }
}
