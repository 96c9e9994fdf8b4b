//! Strongly-typed identifier value objects.
//!
//! Every persisted record is keyed by a database-assigned 64-bit integer.
//! Wrapping each in its own type keeps a `ContentId` from being passed where
//! a `UserId` is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates an identifier, rejecting non-positive values.
            pub fn new(value: i64) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::out_of_range($field, 1, i64::MAX, value));
                }
                Ok(Self(value))
            }

            /// Wraps a value read back from storage.
            pub const fn from_raw(value: i64) -> Self {
                Self(value)
            }

            /// Returns the inner integer.
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value: i64 = s
                    .trim()
                    .parse()
                    .map_err(|_| ValidationError::invalid_format($field, "expected an integer"))?;
                Self::new(value)
            }
        }
    };
}

integer_id!(
    /// Identifier of a registered user (fan, coach or admin).
    UserId,
    "user_id"
);

integer_id!(
    /// Identifier of a content item in the catalog.
    ContentId,
    "content_id"
);

integer_id!(
    /// Identifier of a fan-to-coach subscription.
    SubscriptionId,
    "subscription_id"
);

integer_id!(
    /// Identifier of a pay-per-view purchase.
    PurchaseId,
    "purchase_id"
);

integer_id!(
    /// Identifier of a ledger transaction.
    TransactionId,
    "transaction_id"
);

integer_id!(
    /// Identifier of a coach payout.
    PayoutId,
    "payout_id"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_new_accepts_positive_values() {
        assert_eq!(UserId::new(7).unwrap().as_i64(), 7);
    }

    #[test]
    fn id_new_rejects_zero_and_negative() {
        assert!(ContentId::new(0).is_err());
        assert!(ContentId::new(-3).is_err());
    }

    #[test]
    fn id_parses_from_string() {
        let id: SubscriptionId = "42".parse().unwrap();
        assert_eq!(id.as_i64(), 42);
    }

    #[test]
    fn id_parse_rejects_garbage() {
        let err = "abc".parse::<PurchaseId>().unwrap_err();
        assert_eq!(err.field(), "purchase_id");
    }

    #[test]
    fn id_serializes_transparently() {
        let id = PayoutId::from_raw(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: PayoutId = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn id_displays_inner_value() {
        assert_eq!(TransactionId::from_raw(12).to_string(), "12");
    }
}
