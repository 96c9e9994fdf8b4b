//! Mock payment processor for testing.
//!
//! Supports:
//! - Pre-registered intents returned by `retrieve_payment_intent`
//! - Error injection
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::foundation::{Currency, Money};
use crate::domain::monetization::{
    PaymentIntent, PaymentIntentRequest, PaymentMetadata, STATUS_SUCCEEDED,
};
use crate::ports::{PaymentError, PaymentProcessor};

/// Mock payment processor.
///
/// ```ignore
/// let processor = MockPaymentProcessor::new();
/// processor.add_intent(MockPaymentProcessor::succeeded("pi_1", 1_000, metadata));
/// processor.set_error(PaymentError::network("down"));
/// ```
#[derive(Clone, Default)]
pub struct MockPaymentProcessor {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    intents: HashMap<String, PaymentIntent>,
    next_error: Option<PaymentError>,
    created: Vec<PaymentIntentRequest>,
    retrieved: Vec<String>,
    counter: u64,
}

impl MockPaymentProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A processor whose every call fails with `error`.
    pub fn failing(error: PaymentError) -> Self {
        let mock = Self::new();
        mock.set_error(error);
        mock
    }

    /// A succeeded USD intent.
    pub fn succeeded(id: &str, amount_minor: i64, metadata: PaymentMetadata) -> PaymentIntent {
        Self::with_status(id, STATUS_SUCCEEDED, amount_minor, metadata)
    }

    pub fn with_status(
        id: &str,
        status: &str,
        amount_minor: i64,
        metadata: PaymentMetadata,
    ) -> PaymentIntent {
        PaymentIntent {
            id: id.to_string(),
            status: status.to_string(),
            amount: Money::from_minor(amount_minor.max(0), Currency::usd())
                .unwrap_or_else(|_| Money::zero(Currency::usd())),
            metadata,
            client_secret: Some(format!("{}_secret", id)),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    pub fn add_intent(&self, intent: PaymentIntent) {
        self.state().intents.insert(intent.id.clone(), intent);
    }

    /// Makes every following call fail until cleared.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    pub fn clear_error(&self) {
        self.state().next_error = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    pub fn created_requests(&self) -> Vec<PaymentIntentRequest> {
        self.state().created.clone()
    }

    pub fn retrieved_references(&self) -> Vec<String> {
        self.state().retrieved.clone()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PaymentProcessor for MockPaymentProcessor {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut state = self.state();
        if let Some(err) = state.next_error.clone() {
            return Err(err);
        }
        state.counter += 1;
        let id = format!("pi_mock_{}", state.counter);
        let intent = PaymentIntent {
            id: id.clone(),
            status: "requires_payment_method".to_string(),
            amount: request.amount.clone(),
            metadata: request.metadata.clone(),
            client_secret: Some(format!("{}_secret_mock", id)),
        };
        state.created.push(request);
        state.intents.insert(id, intent.clone());
        Ok(intent)
    }

    async fn retrieve_payment_intent(
        &self,
        reference: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        let mut state = self.state();
        state.retrieved.push(reference.to_string());
        if let Some(err) = state.next_error.clone() {
            return Err(err);
        }
        state
            .intents
            .get(reference)
            .cloned()
            .ok_or_else(|| PaymentError::not_found("PaymentIntent"))
    }
}
