//! Fan-to-coach subscriptions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::MonetizationError;
use crate::domain::foundation::{SubscriptionId, Timestamp, UserId};

/// Billing period of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionPlan {
    Monthly,
    Yearly,
}

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Yearly => "yearly",
        }
    }

    /// Length of one paid period.
    pub fn period_days(&self) -> i64 {
        match self {
            SubscriptionPlan::Monthly => 30,
            SubscriptionPlan::Yearly => 365,
        }
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionPlan {
    type Err = MonetizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(SubscriptionPlan::Monthly),
            "yearly" => Ok(SubscriptionPlan::Yearly),
            other => Err(MonetizationError::invalid_subscription_type(other)),
        }
    }
}

/// A fan's subscription to one coach.
///
/// `is_active` is a flag, not the whole story: a flagged subscription whose
/// `end_date` has passed grants nothing. Use [`Subscription::is_active_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub fan_id: UserId,
    pub coach_id: UserId,
    pub plan: SubscriptionPlan,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub is_active: bool,
    pub payment_reference: Option<String>,
}

impl Subscription {
    /// True when flagged active and not yet expired at `now`.
    pub fn is_active_at(&self, now: &Timestamp) -> bool {
        self.is_active && self.end_date.is_after(now)
    }

    /// Flagged active but past its end date.
    pub fn is_lapsed_at(&self, now: &Timestamp) -> bool {
        self.is_active && !self.end_date.is_after(now)
    }

    pub fn covers(&self, fan_id: UserId, coach_id: UserId) -> bool {
        self.fan_id == fan_id && self.coach_id == coach_id
    }
}

/// A subscription ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    pub fan_id: UserId,
    pub coach_id: UserId,
    pub plan: SubscriptionPlan,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub payment_reference: Option<String>,
}

impl NewSubscription {
    /// Starts a subscription period at `now`.
    pub fn starting(
        fan_id: UserId,
        coach_id: UserId,
        plan: SubscriptionPlan,
        now: Timestamp,
        payment_reference: Option<String>,
    ) -> Self {
        Self {
            fan_id,
            coach_id,
            plan,
            start_date: now,
            end_date: now.add_days(plan.period_days()),
            payment_reference,
        }
    }
}
