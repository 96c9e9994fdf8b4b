//! CheckAccessHandler - Query handler for content entitlement.

use std::sync::Arc;

use crate::domain::content::Content;
use crate::domain::foundation::{ContentId, Timestamp, UserId};
use crate::domain::monetization::{evaluate_access, AccessDecision, MonetizationError};
use crate::ports::{ContentCatalog, PurchaseRepository, SubscriptionRepository, UserDirectory};

/// Query for whether a viewer may see a content item.
#[derive(Debug, Clone)]
pub struct CheckAccessQuery {
    /// Viewer; `None` for anonymous requests.
    pub fan_id: Option<UserId>,
    pub content_id: ContentId,
    /// Fail with `UserNotFound` when `fan_id` names no user, instead of
    /// treating the viewer as unentitled.
    pub verify_fan: bool,
}

/// The content that was checked and the decision.
#[derive(Debug, Clone)]
pub struct CheckAccessResult {
    pub content: Content,
    pub decision: AccessDecision,
}

/// Handler for entitlement checks. Read-only.
#[derive(Clone)]
pub struct CheckAccessHandler {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    purchases: Arc<dyn PurchaseRepository>,
}

impl CheckAccessHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ContentCatalog>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        purchases: Arc<dyn PurchaseRepository>,
    ) -> Self {
        Self {
            users,
            catalog,
            subscriptions,
            purchases,
        }
    }

    pub async fn handle(&self, query: CheckAccessQuery) -> Result<CheckAccessResult, MonetizationError> {
        // 1. Resolve the viewer when the caller asked for a strict check
        if let (true, Some(fan_id)) = (query.verify_fan, query.fan_id) {
            if self.users.find_by_id(fan_id).await?.is_none() {
                return Err(MonetizationError::UserNotFound(fan_id));
            }
        }

        // 2. Load content
        let content = self
            .catalog
            .find_by_id(query.content_id)
            .await?
            .ok_or(MonetizationError::ContentNotFound(query.content_id))?;

        let now = Timestamp::now();

        // 3. Free content and anonymous viewers need no lookups
        let Some(fan_id) = query.fan_id.filter(|_| !content.is_free()) else {
            let decision = evaluate_access(&content, query.fan_id, None, None, &now);
            return Ok(CheckAccessResult { content, decision });
        };

        // 4. Subscription to the owning coach
        let subscription = self
            .subscriptions
            .find_flagged_active(fan_id, content.coach_id)
            .await?;
        let decision = evaluate_access(&content, Some(fan_id), subscription.as_ref(), None, &now);
        if decision.allowed {
            return Ok(CheckAccessResult { content, decision });
        }

        // 5. Pay-per-view purchase of this item
        let purchase = self.purchases.find(fan_id, content.id).await?;
        let decision = evaluate_access(
            &content,
            Some(fan_id),
            subscription.as_ref(),
            purchase.as_ref(),
            &now,
        );

        Ok(CheckAccessResult { content, decision })
    }
}
