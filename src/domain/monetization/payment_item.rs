//! What a payment is for: item types, intent metadata and prices.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{MonetizationError, SubscriptionPlan, TransactionType};
use crate::domain::foundation::UserId;

/// Metadata key holding the purchased item's id (coach id or content id).
pub const METADATA_ITEM_ID: &str = "item_id";
/// Metadata key holding the item type.
pub const METADATA_ITEM_TYPE: &str = "item_type";
/// Metadata key holding the paying fan's id.
pub const METADATA_FAN_ID: &str = "user_id";

/// Kind of item a payment intent pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    SubscriptionMonthly,
    SubscriptionYearly,
    ContentPpv,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::SubscriptionMonthly => "subscription_monthly",
            ItemType::SubscriptionYearly => "subscription_yearly",
            ItemType::ContentPpv => "content_ppv",
        }
    }

    /// Subscription item types carry the target coach id as their item id.
    pub fn subscription_plan(&self) -> Option<SubscriptionPlan> {
        match self {
            ItemType::SubscriptionMonthly => Some(SubscriptionPlan::Monthly),
            ItemType::SubscriptionYearly => Some(SubscriptionPlan::Yearly),
            ItemType::ContentPpv => None,
        }
    }

    pub fn for_plan(plan: SubscriptionPlan) -> Self {
        match plan {
            SubscriptionPlan::Monthly => ItemType::SubscriptionMonthly,
            SubscriptionPlan::Yearly => ItemType::SubscriptionYearly,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            ItemType::SubscriptionMonthly | ItemType::SubscriptionYearly => {
                TransactionType::SubscriptionPayment
            }
            ItemType::ContentPpv => TransactionType::PpvPurchase,
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = MonetizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscription_monthly" => Ok(ItemType::SubscriptionMonthly),
            "subscription_yearly" => Ok(ItemType::SubscriptionYearly),
            "content_ppv" => Ok(ItemType::ContentPpv),
            _ => Err(MonetizationError::InvalidItem),
        }
    }
}

/// Metadata attached to a payment intent when it is created, echoed back by
/// the processor on retrieval and in webhook events.
///
/// Values stay raw strings: events may carry metadata this service never wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMetadata {
    pub item_id: Option<String>,
    pub item_type: Option<String>,
    pub fan_id: Option<String>,
}

impl PaymentMetadata {
    pub fn for_item(item_id: i64, item_type: ItemType, fan_id: UserId) -> Self {
        Self {
            item_id: Some(item_id.to_string()),
            item_type: Some(item_type.as_str().to_string()),
            fan_id: Some(fan_id.to_string()),
        }
    }

    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            item_id: map.get(METADATA_ITEM_ID).cloned(),
            item_type: map.get(METADATA_ITEM_TYPE).cloned(),
            fan_id: map.get(METADATA_FAN_ID).cloned(),
        }
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();
        if let Some(v) = &self.item_id {
            map.insert(METADATA_ITEM_ID.to_string(), v.clone());
        }
        if let Some(v) = &self.item_type {
            map.insert(METADATA_ITEM_TYPE.to_string(), v.clone());
        }
        if let Some(v) = &self.fan_id {
            map.insert(METADATA_FAN_ID.to_string(), v.clone());
        }
        map
    }

    /// Parsed item type, `None` when absent or unrecognised.
    pub fn item_type(&self) -> Option<ItemType> {
        self.item_type.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn item_id(&self) -> Option<i64> {
        self.item_id.as_deref().and_then(|s| s.trim().parse().ok())
    }

    pub fn fan_id(&self) -> Option<UserId> {
        self.fan_id.as_deref().and_then(|s| s.parse().ok())
    }

    /// Checks every key that is present against the expected purchase.
    ///
    /// Absent keys are not a mismatch; intents created outside this service
    /// carry no metadata.
    pub fn is_consistent_with(&self, fan_id: UserId, item_type: ItemType, item_id: i64) -> bool {
        let fan_ok = self
            .fan_id
            .as_deref()
            .map_or(true, |v| v.trim() == fan_id.to_string());
        let type_ok = self
            .item_type
            .as_deref()
            .map_or(true, |v| v == item_type.as_str());
        let id_ok = self
            .item_id
            .as_deref()
            .map_or(true, |v| v.trim() == item_id.to_string());
        fan_ok && type_ok && id_ok
    }
}

/// Prices in minor units for each item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceList {
    pub subscription_monthly: i64,
    pub subscription_yearly: i64,
    pub content_ppv: i64,
}

impl PriceList {
    pub fn amount_for(&self, item_type: ItemType) -> i64 {
        match item_type {
            ItemType::SubscriptionMonthly => self.subscription_monthly,
            ItemType::SubscriptionYearly => self.subscription_yearly,
            ItemType::ContentPpv => self.content_ppv,
        }
    }
}

impl Default for PriceList {
    fn default() -> Self {
        Self {
            subscription_monthly: 1_000,
            subscription_yearly: 10_000,
            content_ppv: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_type_round_trips_through_str() {
        for t in [
            ItemType::SubscriptionMonthly,
            ItemType::SubscriptionYearly,
            ItemType::ContentPpv,
        ] {
            assert_eq!(t.as_str().parse::<ItemType>().unwrap(), t);
        }
        assert!("tip".parse::<ItemType>().is_err());
    }

    #[test]
    fn item_type_maps_to_transaction_type() {
        assert_eq!(
            ItemType::SubscriptionYearly.transaction_type(),
            TransactionType::SubscriptionPayment
        );
        assert_eq!(ItemType::ContentPpv.transaction_type(), TransactionType::PpvPurchase);
    }

    #[test]
    fn metadata_round_trips_through_map() {
        let meta = PaymentMetadata::for_item(3, ItemType::ContentPpv, UserId::from_raw(7));
        let back = PaymentMetadata::from_map(&meta.to_map());
        assert_eq!(back, meta);
        assert_eq!(back.item_id(), Some(3));
        assert_eq!(back.fan_id(), Some(UserId::from_raw(7)));
        assert_eq!(back.item_type(), Some(ItemType::ContentPpv));
    }

    #[test]
    fn metadata_consistency_checks_present_keys_only() {
        let fan = UserId::from_raw(7);
        let full = PaymentMetadata::for_item(2, ItemType::SubscriptionMonthly, fan);
        assert!(full.is_consistent_with(fan, ItemType::SubscriptionMonthly, 2));
        assert!(!full.is_consistent_with(fan, ItemType::SubscriptionYearly, 2));
        assert!(!full.is_consistent_with(UserId::from_raw(8), ItemType::SubscriptionMonthly, 2));
        assert!(!full.is_consistent_with(fan, ItemType::SubscriptionMonthly, 5));
        assert!(PaymentMetadata::default().is_consistent_with(fan, ItemType::ContentPpv, 9));
    }

    #[test]
    fn default_prices() {
        let prices = PriceList::default();
        assert_eq!(prices.amount_for(ItemType::SubscriptionMonthly), 1_000);
        assert_eq!(prices.amount_for(ItemType::SubscriptionYearly), 10_000);
        assert_eq!(prices.amount_for(ItemType::ContentPpv), 500);
    }
}
