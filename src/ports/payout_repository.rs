//! Payout store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PayoutId};
use crate::domain::monetization::{NewPayout, Payout, PayoutStatus};

#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Records a pending payout request.
    async fn insert(&self, payout: NewPayout) -> Result<Payout, DomainError>;

    async fn find_by_id(&self, id: PayoutId) -> Result<Option<Payout>, DomainError>;

    /// Persists status, `processed_at` and transfer reference, but only while
    /// the stored status is still `expected`.
    ///
    /// Returns `false` when another writer moved the payout first.
    ///
    /// # Errors
    ///
    /// - `PayoutNotFound` if the payout does not exist
    async fn update_if_status(
        &self,
        payout: &Payout,
        expected: PayoutStatus,
    ) -> Result<bool, DomainError>;

    /// All payouts, most recently requested first.
    async fn list_all(&self) -> Result<Vec<Payout>, DomainError>;
}
