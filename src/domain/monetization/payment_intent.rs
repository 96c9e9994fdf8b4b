//! Processor-side payment intents as seen by this service.

use crate::domain::foundation::Money;

use super::PaymentMetadata;

/// Processor status string for a completed payment.
pub const STATUS_SUCCEEDED: &str = "succeeded";

/// A payment attempt held by the processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Processor reference (`pi_...`).
    pub id: String,
    /// Raw processor status, e.g. `succeeded` or `requires_action`.
    pub status: String,
    pub amount: Money,
    pub metadata: PaymentMetadata,
    /// Present on freshly created intents.
    pub client_secret: Option<String>,
}

impl PaymentIntent {
    pub fn is_succeeded(&self) -> bool {
        self.status == STATUS_SUCCEEDED
    }
}

/// Request to open a new payment intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntentRequest {
    pub amount: Money,
    pub metadata: PaymentMetadata,
}
