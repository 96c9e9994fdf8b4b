//! In-memory subscription store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, SubscriptionId, UserId};
use crate::domain::monetization::{NewSubscription, Subscription};
use crate::ports::{InsertOutcome, SubscriptionRepository};

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    rows: BTreeMap<i64, Subscription>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    state: Arc<RwLock<State>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a row as given, bypassing the active-pair rule. For fixtures.
    pub async fn seed(&self, mut subscription: Subscription) -> Subscription {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        subscription.id = SubscriptionId::from_raw(id);
        state.rows.insert(id, subscription.clone());
        subscription
    }

    pub async fn all(&self) -> Vec<Subscription> {
        self.state.read().await.rows.values().cloned().collect()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn find_flagged_active(
        &self,
        fan_id: UserId,
        coach_id: UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|s| s.is_active && s.covers(fan_id, coach_id))
            .cloned())
    }

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.state.read().await.rows.get(&id.as_i64()).cloned())
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Subscription>, DomainError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|s| s.payment_reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn deactivate(&self, id: SubscriptionId) -> Result<(), DomainError> {
        if let Some(row) = self.state.write().await.rows.get_mut(&id.as_i64()) {
            row.is_active = false;
        }
        Ok(())
    }

    async fn insert_active(
        &self,
        subscription: NewSubscription,
    ) -> Result<InsertOutcome<Subscription>, DomainError> {
        let mut state = self.state.write().await;
        let conflict = state.rows.values().find(|s| {
            (s.is_active && s.covers(subscription.fan_id, subscription.coach_id))
                || (subscription.payment_reference.is_some()
                    && s.payment_reference == subscription.payment_reference)
        });
        if let Some(existing) = conflict {
            return Ok(InsertOutcome::AlreadyExists(existing.clone()));
        }
        state.next_id += 1;
        let id = state.next_id;
        let row = Subscription {
            id: SubscriptionId::from_raw(id),
            fan_id: subscription.fan_id,
            coach_id: subscription.coach_id,
            plan: subscription.plan,
            start_date: subscription.start_date,
            end_date: subscription.end_date,
            is_active: true,
            payment_reference: subscription.payment_reference,
        };
        state.rows.insert(id, row.clone());
        Ok(InsertOutcome::Inserted(row))
    }
}
