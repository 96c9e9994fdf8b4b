//! In-memory purchase store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ContentId, DomainError, PurchaseId, UserId};
use crate::domain::monetization::{NewPurchase, Purchase};
use crate::ports::{InsertOutcome, PurchaseRepository};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Purchase>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPurchaseRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryPurchaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Purchase> {
        self.state.read().await.rows.values().cloned().collect()
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryPurchaseRepository {
    async fn find(
        &self,
        fan_id: UserId,
        content_id: ContentId,
    ) -> Result<Option<Purchase>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|p| p.grants(fan_id, content_id))
            .cloned())
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Purchase>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|p| p.payment_reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn insert(&self, purchase: NewPurchase) -> Result<InsertOutcome<Purchase>, DomainError> {
        let mut state = self.state.write().await;
        let reference = purchase.payment_reference.as_deref();
        if let Some(existing) = state.rows.values().find(|p| {
            p.grants(purchase.fan_id, purchase.content_id)
                || (reference.is_some() && p.payment_reference.as_deref() == reference)
        }) {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        state.next_id += 1;
        let id = state.next_id;
        let row = Purchase {
            id: PurchaseId::from_raw(id),
            fan_id: purchase.fan_id,
            content_id: purchase.content_id,
            purchased_at: purchase.purchased_at,
            amount: purchase.amount,
            payment_reference: purchase.payment_reference,
        };
        state.rows.insert(id, row.clone());
        Ok(InsertOutcome::Inserted(row))
    }
}
