//! Entitlement decisions: may this viewer see this content?

use serde::Serialize;
use std::fmt;

use super::{Purchase, Subscription};
use crate::domain::content::Content;
use crate::domain::foundation::{Timestamp, UserId};

/// Why access was granted or denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// Content is free for everyone.
    Free,
    /// Paywalled content and no viewer identity.
    Unauthenticated,
    /// Active subscription to the owning coach.
    Subscription,
    /// Pay-per-view purchase of this item.
    Purchase,
    /// Neither subscription nor purchase.
    NoEntitlement,
}

impl AccessReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessReason::Free => "free",
            AccessReason::Unauthenticated => "unauthenticated",
            AccessReason::Subscription => "subscription",
            AccessReason::Purchase => "purchase",
            AccessReason::NoEntitlement => "no entitlement",
        }
    }

    /// Human-readable wording returned to API clients.
    pub fn describe(&self) -> &'static str {
        match self {
            AccessReason::Free => "Content is free",
            AccessReason::Unauthenticated => "User not identified for paid content",
            AccessReason::Subscription => "Active subscription to coach",
            AccessReason::Purchase => "Content purchased (pay-per-view)",
            AccessReason::NoEntitlement => "No active subscription or purchase",
        }
    }
}

impl fmt::Display for AccessReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allow(reason: AccessReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny(reason: AccessReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }
}

/// Decides access from already-loaded records. Pure.
///
/// `subscription` and `purchase` are whatever the caller found for the viewer;
/// records that do not belong to this viewer, coach or content are ignored.
/// A subscription counts only when flagged active and unexpired at `now`.
pub fn evaluate_access(
    content: &Content,
    fan_id: Option<UserId>,
    subscription: Option<&Subscription>,
    purchase: Option<&Purchase>,
    now: &Timestamp,
) -> AccessDecision {
    if content.is_free() {
        return AccessDecision::allow(AccessReason::Free);
    }

    let Some(fan_id) = fan_id else {
        return AccessDecision::deny(AccessReason::Unauthenticated);
    };

    let subscribed = subscription
        .map(|s| s.covers(fan_id, content.coach_id) && s.is_active_at(now))
        .unwrap_or(false);
    if subscribed {
        return AccessDecision::allow(AccessReason::Subscription);
    }

    let purchased = purchase
        .map(|p| p.grants(fan_id, content.id))
        .unwrap_or(false);
    if purchased {
        return AccessDecision::allow(AccessReason::Purchase);
    }

    AccessDecision::deny(AccessReason::NoEntitlement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{AccessSetting, ContentBody, ContentType};
    use crate::domain::foundation::{
        ContentId, Currency, Money, PurchaseId, SubscriptionId,
    };
    use crate::domain::monetization::SubscriptionPlan;

    const FAN: i64 = 7;
    const COACH: i64 = 2;

    fn content(id: i64, access: AccessSetting) -> Content {
        let now = Timestamp::now();
        Content {
            id: ContentId::from_raw(id),
            coach_id: UserId::from_raw(COACH),
            title: "Tempo runs".to_string(),
            description: None,
            content_type: ContentType::Text,
            access_setting: access,
            body: ContentBody::Text("...".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn subscription(end_offset_days: i64, is_active: bool, now: Timestamp) -> Subscription {
        Subscription {
            id: SubscriptionId::from_raw(1),
            fan_id: UserId::from_raw(FAN),
            coach_id: UserId::from_raw(COACH),
            plan: SubscriptionPlan::Monthly,
            start_date: now.add_days(-10),
            end_date: now.add_days(end_offset_days),
            is_active,
            payment_reference: None,
        }
    }

    fn purchase(content_id: i64) -> Purchase {
        Purchase {
            id: PurchaseId::from_raw(1),
            fan_id: UserId::from_raw(FAN),
            content_id: ContentId::from_raw(content_id),
            purchased_at: Timestamp::now(),
            amount: Money::from_minor(500, Currency::usd()).unwrap(),
            payment_reference: None,
        }
    }

    #[test]
    fn free_content_allowed_without_identity() {
        let now = Timestamp::now();
        let d = evaluate_access(&content(1, AccessSetting::Free), None, None, None, &now);
        assert_eq!(d, AccessDecision::allow(AccessReason::Free));
    }

    #[test]
    fn free_content_allowed_for_any_fan() {
        let now = Timestamp::now();
        let d = evaluate_access(
            &content(1, AccessSetting::Free),
            Some(UserId::from_raw(99)),
            None,
            None,
            &now,
        );
        assert!(d.allowed);
    }

    #[test]
    fn paywalled_content_denied_without_identity() {
        let now = Timestamp::now();
        let d = evaluate_access(&content(3, AccessSetting::Paywall), None, None, None, &now);
        assert_eq!(d, AccessDecision::deny(AccessReason::Unauthenticated));
    }

    #[test]
    fn paywalled_content_denied_without_grants() {
        let now = Timestamp::now();
        let d = evaluate_access(
            &content(3, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            None,
            None,
            &now,
        );
        assert_eq!(d, AccessDecision::deny(AccessReason::NoEntitlement));
        assert_eq!(d.reason.describe(), "No active subscription or purchase");
    }

    #[test]
    fn active_subscription_allows_coach_content() {
        let now = Timestamp::now();
        let sub = subscription(10, true, now);
        let d = evaluate_access(
            &content(3, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            Some(&sub),
            None,
            &now,
        );
        assert_eq!(d, AccessDecision::allow(AccessReason::Subscription));
    }

    #[test]
    fn expired_subscription_denies_even_when_flagged_active() {
        let now = Timestamp::now();
        let sub = subscription(-1, true, now);
        let d = evaluate_access(
            &content(3, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            Some(&sub),
            None,
            &now,
        );
        assert_eq!(d, AccessDecision::deny(AccessReason::NoEntitlement));
    }

    #[test]
    fn subscription_to_other_coach_is_ignored() {
        let now = Timestamp::now();
        let mut sub = subscription(10, true, now);
        sub.coach_id = UserId::from_raw(55);
        let d = evaluate_access(
            &content(3, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            Some(&sub),
            None,
            &now,
        );
        assert!(!d.allowed);
    }

    #[test]
    fn purchase_grants_only_that_item() {
        let now = Timestamp::now();
        let bought = purchase(3);
        let d = evaluate_access(
            &content(3, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            None,
            Some(&bought),
            &now,
        );
        assert_eq!(d, AccessDecision::allow(AccessReason::Purchase));

        let other = evaluate_access(
            &content(4, AccessSetting::Paywall),
            Some(UserId::from_raw(FAN)),
            None,
            Some(&bought),
            &now,
        );
        assert!(!other.allowed);
    }

    #[test]
    fn reason_strings() {
        assert_eq!(AccessReason::NoEntitlement.as_str(), "no entitlement");
        assert_eq!(AccessReason::Free.describe(), "Content is free");
    }
}
