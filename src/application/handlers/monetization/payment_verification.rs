//! Server-side re-verification of client-reported payments.

use tracing::warn;

use crate::domain::foundation::UserId;
use crate::domain::monetization::{ItemType, MonetizationError, PaymentIntent};
use crate::ports::PaymentProcessor;

/// Expected contents of a payment the client says has completed.
#[derive(Debug, Clone, Copy)]
pub struct ExpectedPayment {
    pub fan_id: UserId,
    pub item_type: ItemType,
    pub item_id: i64,
}

/// Fetches the processor's record of `reference` and checks it paid for
/// `expected`.
///
/// - processor failure: `PaymentProvider`
/// - status other than succeeded: `PaymentIncomplete`
/// - metadata naming another fan, item or item type: `PaymentMismatch`
pub async fn verify_payment(
    processor: &dyn PaymentProcessor,
    reference: &str,
    expected: ExpectedPayment,
) -> Result<PaymentIntent, MonetizationError> {
    let intent = processor
        .retrieve_payment_intent(reference)
        .await
        .map_err(|e| {
            warn!(payment_reference = reference, error = %e, "Payment lookup failed");
            MonetizationError::payment_provider(e.message)
        })?;

    if !intent.is_succeeded() {
        return Err(MonetizationError::payment_incomplete(intent.status));
    }

    if !intent
        .metadata
        .is_consistent_with(expected.fan_id, expected.item_type, expected.item_id)
    {
        warn!(
            payment_reference = reference,
            fan_id = %expected.fan_id,
            item_type = %expected.item_type,
            item_id = expected.item_id,
            "Payment metadata does not match request"
        );
        return Err(MonetizationError::PaymentMismatch);
    }

    Ok(intent)
}
