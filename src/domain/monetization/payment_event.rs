//! Payment processor webhook events.
//!
//! Only the fields reconciliation needs are captured; everything else in the
//! processor's event schema is ignored.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{PaymentIntent, PaymentMetadata, WebhookError};
use crate::domain::foundation::{Currency, Money};

/// A webhook event envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEvent {
    /// Event id (`evt_...`).
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: String,

    /// Unix seconds.
    #[serde(default)]
    pub created: i64,

    pub data: PaymentEventData,

    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEventData {
    /// Shape depends on `type`.
    pub object: serde_json::Value,
}

/// Event types the reconciliation processor distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentEventKind {
    PaymentIntentSucceeded,
    PaymentMethodAttached,
    Other,
}

impl PaymentEventKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "payment_intent.succeeded" => Self::PaymentIntentSucceeded,
            "payment_method.attached" => Self::PaymentMethodAttached,
            _ => Self::Other,
        }
    }
}

impl PaymentEvent {
    pub fn kind(&self) -> PaymentEventKind {
        PaymentEventKind::parse(&self.event_type)
    }

    /// Reads `data.object` as a payment intent.
    pub fn payment_intent(&self) -> Result<PaymentIntent, WebhookError> {
        let object: PaymentIntentObject = serde_json::from_value(self.data.object.clone())
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        object.into_intent()
    }
}

/// Wire form of a payment intent, shared by webhook payloads and the REST API.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentIntentObject {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl PaymentIntentObject {
    pub fn into_intent(self) -> Result<PaymentIntent, WebhookError> {
        if self.id.is_empty() {
            return Err(WebhookError::MissingField("id"));
        }
        let currency =
            Currency::new(&self.currency).map_err(|e| WebhookError::ParseError(e.to_string()))?;
        let amount = Money::from_minor(self.amount, currency)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        Ok(PaymentIntent {
            id: self.id,
            status: self.status.unwrap_or_default(),
            amount,
            metadata: PaymentMetadata::from_map(&self.metadata),
            client_secret: self.client_secret,
        })
    }
}
