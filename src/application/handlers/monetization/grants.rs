//! Idempotent creation of entitlement grants.
//!
//! Client-reported success and the payment webhook both land here, in either
//! order and possibly more than once. Storage uniqueness constraints settle
//! races; a conflict resolves to the row that won.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::foundation::{ContentId, Money, Timestamp, UserId};
use crate::domain::monetization::{
    MonetizationError, NewPurchase, NewSubscription, Purchase, Subscription, SubscriptionPlan,
};
use crate::ports::{InsertOutcome, PurchaseRepository, SubscriptionRepository};

#[derive(Clone)]
pub struct GrantIssuer {
    subscriptions: Arc<dyn SubscriptionRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl GrantIssuer {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionRepository>,
        purchases: Arc<dyn PurchaseRepository>,
    ) -> Self {
        Self {
            subscriptions,
            purchases,
        }
    }

    /// Makes sure `fan` holds a live subscription to `coach` paid by `reference`.
    ///
    /// Returns `AlreadyExists` when the reference was already redeemed or an
    /// unexpired subscription covers the pair.
    pub async fn ensure_subscription(
        &self,
        fan_id: UserId,
        coach_id: UserId,
        plan: SubscriptionPlan,
        reference: &str,
        now: Timestamp,
    ) -> Result<InsertOutcome<Subscription>, MonetizationError> {
        // 1. Reference already redeemed
        if let Some(existing) = self.subscriptions.find_by_payment_reference(reference).await? {
            if !existing.covers(fan_id, coach_id) {
                return Err(MonetizationError::PaymentMismatch);
            }
            return Ok(InsertOutcome::AlreadyExists(existing));
        }
        if self.purchases.find_by_payment_reference(reference).await?.is_some() {
            warn!(reference, "Payment reference already paid for a purchase");
            return Err(MonetizationError::PaymentMismatch);
        }

        // 2. Live subscription for the pair, or a lapsed one to retire
        if let Some(current) = self.subscriptions.find_flagged_active(fan_id, coach_id).await? {
            if current.is_active_at(&now) {
                debug!(subscription_id = %current.id, "Subscription already active");
                return Ok(InsertOutcome::AlreadyExists(current));
            }
            info!(
                subscription_id = %current.id,
                fan_id = %fan_id,
                coach_id = %coach_id,
                "Deactivating lapsed subscription"
            );
            self.subscriptions.deactivate(current.id).await?;
        }

        // 3. Insert; a concurrent winner comes back as AlreadyExists
        let outcome = self
            .subscriptions
            .insert_active(NewSubscription::starting(
                fan_id,
                coach_id,
                plan,
                now,
                Some(reference.to_string()),
            ))
            .await?;

        Ok(outcome)
    }

    /// Makes sure `fan` holds a pay-per-view purchase of `content`.
    ///
    /// A payment reference buys exactly one (fan, content) pair; presenting
    /// it for anything else is a mismatch.
    pub async fn ensure_purchase(
        &self,
        fan_id: UserId,
        content_id: ContentId,
        amount: Money,
        reference: &str,
        now: Timestamp,
    ) -> Result<InsertOutcome<Purchase>, MonetizationError> {
        // 1. Reference already redeemed
        if let Some(existing) = self.purchases.find_by_payment_reference(reference).await? {
            if !existing.grants(fan_id, content_id) {
                warn!(
                    reference,
                    purchase_id = %existing.id,
                    "Payment reference already paid for other content"
                );
                return Err(MonetizationError::PaymentMismatch);
            }
            return Ok(InsertOutcome::AlreadyExists(existing));
        }
        if self.subscriptions.find_by_payment_reference(reference).await?.is_some() {
            warn!(reference, "Payment reference already paid for a subscription");
            return Err(MonetizationError::PaymentMismatch);
        }

        // 2. Pair already purchased with another payment
        if let Some(existing) = self.purchases.find(fan_id, content_id).await? {
            return Ok(InsertOutcome::AlreadyExists(existing));
        }

        // 3. Insert; a concurrent winner on either key comes back as AlreadyExists
        let outcome = self
            .purchases
            .insert(NewPurchase {
                fan_id,
                content_id,
                purchased_at: now,
                amount,
                payment_reference: Some(reference.to_string()),
            })
            .await?;

        if !outcome.record().grants(fan_id, content_id) {
            return Err(MonetizationError::PaymentMismatch);
        }
        Ok(outcome)
    }
}
