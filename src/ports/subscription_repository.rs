//! Subscription store port.
//!
//! Implementations must guarantee at most one row with `is_active = true`
//! per (fan, coach) pair, e.g. with a partial unique index.

use async_trait::async_trait;

use super::InsertOutcome;
use crate::domain::foundation::{DomainError, SubscriptionId, UserId};
use crate::domain::monetization::{NewSubscription, Subscription};

#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// The row flagged active for the pair, whatever its end date.
    async fn find_flagged_active(
        &self,
        fan_id: UserId,
        coach_id: UserId,
    ) -> Result<Option<Subscription>, DomainError>;

    async fn find_by_id(&self, id: SubscriptionId) -> Result<Option<Subscription>, DomainError>;

    /// A subscription already created for this payment reference, if any.
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Subscription>, DomainError>;

    /// Clears the active flag. No-op if already inactive.
    async fn deactivate(&self, id: SubscriptionId) -> Result<(), DomainError>;

    /// Inserts with `is_active = true`.
    ///
    /// A conflict on the active pair resolves to the row already holding it.
    async fn insert_active(
        &self,
        subscription: NewSubscription,
    ) -> Result<InsertOutcome<Subscription>, DomainError>;
}
