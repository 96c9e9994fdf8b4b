//! In-memory payout store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PayoutId};
use crate::domain::monetization::{NewPayout, Payout, PayoutStatus};
use crate::ports::PayoutRepository;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Payout>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPayoutRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryPayoutRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PayoutRepository for InMemoryPayoutRepository {
    async fn insert(&self, payout: NewPayout) -> Result<Payout, DomainError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        let row = Payout {
            id: PayoutId::from_raw(id),
            coach_id: payout.coach_id,
            amount: payout.amount,
            status: PayoutStatus::Pending,
            requested_at: payout.requested_at,
            processed_at: None,
            transfer_reference: None,
        };
        state.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: PayoutId) -> Result<Option<Payout>, DomainError> {
        Ok(self.state.read().await.rows.get(&id.as_i64()).cloned())
    }

    async fn update_if_status(
        &self,
        payout: &Payout,
        expected: PayoutStatus,
    ) -> Result<bool, DomainError> {
        let mut state = self.state.write().await;
        match state.rows.get_mut(&payout.id.as_i64()) {
            Some(row) if row.status != expected => Ok(false),
            Some(row) => {
                *row = payout.clone();
                Ok(true)
            }
            None => Err(DomainError::new(
                ErrorCode::PayoutNotFound,
                format!("Payout {} not found", payout.id),
            )),
        }
    }

    async fn list_all(&self) -> Result<Vec<Payout>, DomainError> {
        let mut rows: Vec<_> = self.state.read().await.rows.values().cloned().collect();
        rows.sort_by(|a, b| {
            b.requested_at
                .cmp(&a.requested_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(rows)
    }
}
