//! Data Transfer Objects for monetization endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PurchaseId, SubscriptionId};

pub const SUBSCRIBE_FIELDS_REQUIRED: &str =
    "Fan ID, Coach ID, subscription type, and payment_intent_id are required";
pub const PURCHASE_FIELDS_REQUIRED: &str =
    "Fan ID, Content ID, and payment_intent_id are required";

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/monetization/create_payment_intent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentIntentRequest {
    /// Coach id for subscriptions, content id for pay-per-view.
    #[serde(default)]
    pub item_id: Option<i64>,
    /// `subscription_monthly`, `subscription_yearly` or `content_ppv`.
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub fan_id: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// POST /api/monetization/subscribe
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub fan_id: Option<i64>,
    #[serde(default)]
    pub coach_id: Option<i64>,
    /// `monthly` or `yearly`.
    #[serde(default)]
    pub subscription_type: Option<String>,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

/// POST /api/monetization/purchase_content
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PurchaseContentRequest {
    #[serde(default)]
    pub fan_id: Option<i64>,
    #[serde(default)]
    pub content_id: Option<i64>,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub message: String,
    pub subscription_id: SubscriptionId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseResponse {
    pub message: String,
    pub purchase_id: PurchaseId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAckResponse {
    pub success: bool,
}

/// Entitlement check result. Denials also carry the standard error fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCheckResponse {
    pub access: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}
