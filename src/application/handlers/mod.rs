//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations through
//! ports. One module per area.

pub mod account;
pub mod admin;
pub mod content;
pub mod monetization;
pub mod payout;

#[cfg(test)]
pub(crate) mod test_support;
