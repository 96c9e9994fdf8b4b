//! Creator Pay - creator monetization backend.
//!
//! Coaches publish content, fans pay for it by subscription or per item, and
//! payment webhooks reconcile every successful charge into a fee-split ledger.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
