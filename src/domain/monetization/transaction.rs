//! Immutable ledger transactions.
//!
//! Only the payment reconciliation processor creates these; client-facing
//! endpoints never write the ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FeeSplit;
use crate::domain::foundation::{
    ContentId, Currency, Money, PurchaseId, StateMachine, SubscriptionId, Timestamp,
    TransactionId, UserId, ValidationError,
};

/// Category of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    SubscriptionPayment,
    PpvPurchase,
    Payout,
    PlatformFee,
    /// Payment for an item type this service does not recognise. Still
    /// recorded so no money goes unaccounted for.
    UnknownPayment,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::SubscriptionPayment => "subscription_payment",
            TransactionType::PpvPurchase => "ppv_purchase",
            TransactionType::Payout => "payout",
            TransactionType::PlatformFee => "platform_fee",
            TransactionType::UnknownPayment => "unknown_payment",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscription_payment" => Ok(TransactionType::SubscriptionPayment),
            "ppv_purchase" => Ok(TransactionType::PpvPurchase),
            "payout" => Ok(TransactionType::Payout),
            "platform_fee" => Ok(TransactionType::PlatformFee),
            "unknown_payment" => Ok(TransactionType::UnknownPayment),
            other => Err(ValidationError::invalid_format(
                "transaction_type",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Succeeded,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Succeeded => "succeeded",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TransactionStatus::Pending),
            "succeeded" => Ok(TransactionStatus::Succeeded),
            "failed" => Ok(TransactionStatus::Failed),
            "refunded" => Ok(TransactionStatus::Refunded),
            other => Err(ValidationError::invalid_format(
                "transaction_status",
                format!("unknown value '{}'", other),
            )),
        }
    }
}

impl StateMachine for TransactionStatus {
    const ALL: &'static [Self] = &[
        TransactionStatus::Pending,
        TransactionStatus::Succeeded,
        TransactionStatus::Failed,
        TransactionStatus::Refunded,
    ];

    fn can_transition_to(&self, target: &Self) -> bool {
        matches!(
            (self, target),
            (TransactionStatus::Pending, TransactionStatus::Succeeded)
                | (TransactionStatus::Pending, TransactionStatus::Failed)
                | (TransactionStatus::Succeeded, TransactionStatus::Refunded)
        )
    }
}

/// A recorded ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: TransactionId,
    pub transaction_type: TransactionType,
    pub fan_id: Option<UserId>,
    pub coach_id: Option<UserId>,
    pub content_id: Option<ContentId>,
    pub subscription_id: Option<SubscriptionId>,
    pub purchase_id: Option<PurchaseId>,
    pub gross: Money,
    pub platform_fee: Money,
    pub net: Money,
    /// External payment reference; unique across the ledger.
    pub payment_reference: String,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
}

impl Transaction {
    pub fn currency(&self) -> &Currency {
        self.gross.currency()
    }
}

/// A ledger entry ready to be appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub transaction_type: TransactionType,
    pub fan_id: Option<UserId>,
    pub coach_id: Option<UserId>,
    pub content_id: Option<ContentId>,
    pub subscription_id: Option<SubscriptionId>,
    pub purchase_id: Option<PurchaseId>,
    pub gross: Money,
    pub platform_fee: Money,
    pub net: Money,
    pub payment_reference: String,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
}

impl NewTransaction {
    /// A succeeded payment split according to `split`.
    pub fn succeeded_payment(
        transaction_type: TransactionType,
        split: FeeSplit,
        payment_reference: impl Into<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            transaction_type,
            fan_id: None,
            coach_id: None,
            content_id: None,
            subscription_id: None,
            purchase_id: None,
            gross: split.gross,
            platform_fee: split.platform_fee,
            net: split.net,
            payment_reference: payment_reference.into(),
            status: TransactionStatus::Succeeded,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::monetization::FeeRate;

    #[test]
    fn transaction_type_strings() {
        assert_eq!(TransactionType::UnknownPayment.as_str(), "unknown_payment");
        assert_eq!(
            "ppv_purchase".parse::<TransactionType>().unwrap(),
            TransactionType::PpvPurchase
        );
        assert!("gift".parse::<TransactionType>().is_err());
    }

    #[test]
    fn status_transitions() {
        assert!(TransactionStatus::Pending.can_transition_to(&TransactionStatus::Succeeded));
        assert!(TransactionStatus::Succeeded.can_transition_to(&TransactionStatus::Refunded));
        assert!(!TransactionStatus::Refunded.can_transition_to(&TransactionStatus::Succeeded));
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn succeeded_payment_copies_split() {
        let gross = Money::from_minor(10_000, Currency::usd()).unwrap();
        let split = FeeSplit::compute(gross, FeeRate::default());
        let tx = NewTransaction::succeeded_payment(
            TransactionType::SubscriptionPayment,
            split,
            "pi_123",
            Timestamp::now(),
        );
        assert_eq!(tx.status, TransactionStatus::Succeeded);
        assert_eq!(tx.platform_fee.minor(), 1_500);
        assert_eq!(tx.net.minor(), 8_500);
        assert_eq!(tx.payment_reference, "pi_123");
    }
}
