//! Monetization HTTP adapter: payment intents, grants, webhooks and access checks.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{MonetizationApiError, WebhookApiError, SIGNATURE_HEADER};
pub use routes::monetization_routes;
