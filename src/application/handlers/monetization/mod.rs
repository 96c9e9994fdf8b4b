//! Monetization handlers.
//!
//! ## Commands
//! - Creating payment intents
//! - Subscribing and purchasing after client-reported payment
//! - Reconciling payment webhooks into the ledger
//!
//! ## Queries
//! - Content entitlement checks

mod check_access;
mod create_payment_intent;
mod grants;
mod handle_payment_event;
mod payment_verification;
mod purchase_content;
mod subscribe;

// Commands
pub use create_payment_intent::{
    CreatePaymentIntentCommand, CreatePaymentIntentHandler, CreatePaymentIntentResult,
};
pub use handle_payment_event::{
    HandlePaymentEventCommand, HandlePaymentEventHandler, HandlePaymentEventResult,
};
pub use purchase_content::{
    PurchaseContentCommand, PurchaseContentHandler, PurchaseContentResult,
};
pub use subscribe::{SubscribeCommand, SubscribeHandler, SubscribeResult};

// Queries
pub use check_access::{CheckAccessHandler, CheckAccessQuery, CheckAccessResult};

// Shared
pub use grants::GrantIssuer;
pub use payment_verification::{verify_payment, ExpectedPayment};
