//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, timestamps, errors)
//! - `account` - Users, roles, credentials and profiles
//! - `content` - Coach-published content and its access setting
//! - `monetization` - Entitlements, subscriptions, purchases, ledger, payouts
//! - `admin` - Operator capability and admin errors

pub mod account;
pub mod admin;
pub mod content;
pub mod foundation;
pub mod monetization;
