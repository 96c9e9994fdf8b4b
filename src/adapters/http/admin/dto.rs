//! Data Transfer Objects for admin endpoints.
//!
//! User and content listings reuse the account and content views.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    ContentId, PayoutId, PurchaseId, SubscriptionId, TransactionId, UserId,
};
use crate::domain::monetization::{Payout, Transaction};

/// POST /api/admin/config/platform_fee
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetPlatformFeeRequest {
    #[serde(default)]
    pub fee_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformFeeResponse {
    pub message: String,
    pub previous_percentage: f64,
    pub fee_percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPayoutResponse {
    pub message: String,
    pub payout_status: String,
}

/// Ledger row. Amounts are in major units; `*_minor` fields are exact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub transaction_type: String,
    pub user_id: Option<UserId>,
    pub coach_id: Option<UserId>,
    pub content_id: Option<ContentId>,
    pub subscription_id: Option<SubscriptionId>,
    pub purchase_id: Option<PurchaseId>,
    pub amount: f64,
    pub platform_fee: f64,
    pub net_amount: f64,
    pub amount_minor: i64,
    pub platform_fee_minor: i64,
    pub net_amount_minor: i64,
    pub currency: String,
    pub stripe_payment_intent_id: String,
    pub status: String,
    pub created_at: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            transaction_type: tx.transaction_type.as_str().to_string(),
            user_id: tx.fan_id,
            coach_id: tx.coach_id,
            content_id: tx.content_id,
            subscription_id: tx.subscription_id,
            purchase_id: tx.purchase_id,
            amount: tx.gross.major_units(),
            platform_fee: tx.platform_fee.major_units(),
            net_amount: tx.net.major_units(),
            amount_minor: tx.gross.minor(),
            platform_fee_minor: tx.platform_fee.minor(),
            net_amount_minor: tx.net.minor(),
            currency: tx.gross.currency().as_str().to_string(),
            stripe_payment_intent_id: tx.payment_reference,
            status: tx.status.as_str().to_string(),
            created_at: tx.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutResponse {
    pub id: PayoutId,
    pub coach_id: UserId,
    pub amount: f64,
    pub amount_minor: i64,
    pub currency: String,
    pub status: String,
    pub requested_at: String,
    pub processed_at: Option<String>,
    pub stripe_transfer_id: Option<String>,
}

impl From<Payout> for PayoutResponse {
    fn from(payout: Payout) -> Self {
        Self {
            id: payout.id,
            coach_id: payout.coach_id,
            amount: payout.amount.major_units(),
            amount_minor: payout.amount.minor(),
            currency: payout.amount.currency().as_str().to_string(),
            status: payout.status.as_str().to_string(),
            requested_at: payout.requested_at.to_rfc3339(),
            processed_at: payout.processed_at.map(|t| t.to_rfc3339()),
            stripe_transfer_id: payout.transfer_reference,
        }
    }
}
