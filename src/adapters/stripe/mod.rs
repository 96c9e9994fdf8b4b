//! Stripe payment processor adapters.
//!
//! - `StripePaymentProcessor` - REST client for payment intents
//! - `MockPaymentProcessor` - scripted processor for tests and local runs
//!
//! Webhook signature verification is a domain concern and lives in
//! `domain::monetization::WebhookVerifier`.
//!
//! # Security
//!
//! - API keys are held as `secrecy::SecretString` and redacted in `Debug`

mod mock_payment_processor;
mod stripe_processor;

pub use mock_payment_processor::MockPaymentProcessor;
pub use stripe_processor::{StripeConfig, StripePaymentProcessor};
