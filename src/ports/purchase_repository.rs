//! Pay-per-view purchase store port.
//!
//! (fan, content) is unique, and so is the payment reference.

use async_trait::async_trait;

use super::InsertOutcome;
use crate::domain::foundation::{ContentId, DomainError, UserId};
use crate::domain::monetization::{NewPurchase, Purchase};

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn find(&self, fan_id: UserId, content_id: ContentId)
        -> Result<Option<Purchase>, DomainError>;

    /// The purchase already paid for by this payment reference, if any.
    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> Result<Option<Purchase>, DomainError>;

    /// Inserts, resolving a (fan, content) or payment reference conflict to
    /// the existing row.
    async fn insert(&self, purchase: NewPurchase) -> Result<InsertOutcome<Purchase>, DomainError>;
}
