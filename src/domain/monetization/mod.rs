//! Monetization module - entitlements, subscriptions, purchases, the
//! transaction ledger, payouts and payment reconciliation primitives.
//!
//! Everything here is pure: decisions take already-loaded records and a
//! clock reading. Persistence and processor calls live behind ports.

mod entitlement;
mod errors;
mod fee;
mod payment_event;
mod payment_intent;
mod payment_item;
mod payout;
mod purchase;
mod subscription;
mod transaction;
mod webhook_errors;
mod webhook_verifier;

pub use entitlement::{evaluate_access, AccessDecision, AccessReason};
pub use errors::MonetizationError;
pub use fee::{FeeRate, FeeSplit, PlatformFeeSetting, DEFAULT_FEE_BPS};
pub use payment_event::{PaymentEvent, PaymentEventData, PaymentEventKind, PaymentIntentObject};
pub use payment_intent::{PaymentIntent, PaymentIntentRequest, STATUS_SUCCEEDED};
pub use payment_item::{
    ItemType, PaymentMetadata, PriceList, METADATA_FAN_ID, METADATA_ITEM_ID, METADATA_ITEM_TYPE,
};
pub use payout::{NewPayout, Payout, PayoutStatus};
pub use purchase::{NewPurchase, Purchase};
pub use subscription::{NewSubscription, Subscription, SubscriptionPlan};
pub use transaction::{NewTransaction, Transaction, TransactionStatus, TransactionType};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{signature_header_for, SignatureHeader, WebhookVerifier};
