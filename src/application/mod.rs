//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write, query handlers read; neither talks to HTTP.

pub mod handlers;

pub use handlers::monetization::{
    CheckAccessHandler, CreatePaymentIntentHandler, HandlePaymentEventHandler,
    PurchaseContentHandler, SubscribeHandler,
};
