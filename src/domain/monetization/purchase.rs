//! Pay-per-view purchases.

use crate::domain::foundation::{ContentId, Money, PurchaseId, Timestamp, UserId};

/// Permanent access to one content item for one fan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub id: PurchaseId,
    pub fan_id: UserId,
    pub content_id: ContentId,
    pub purchased_at: Timestamp,
    /// Amount actually paid, as confirmed by the payment processor.
    pub amount: Money,
    pub payment_reference: Option<String>,
}

impl Purchase {
    pub fn grants(&self, fan_id: UserId, content_id: ContentId) -> bool {
        self.fan_id == fan_id && self.content_id == content_id
    }
}

/// A purchase ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchase {
    pub fan_id: UserId,
    pub content_id: ContentId,
    pub purchased_at: Timestamp,
    pub amount: Money,
    pub payment_reference: Option<String>,
}
