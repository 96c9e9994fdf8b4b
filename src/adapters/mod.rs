//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-memory stores for tests and database-less runs
//! - `postgres` - sqlx-backed stores
//! - `stripe` - Payment processor client and a scripted mock
//! - `auth` - Password hashing and the admin key gate
//! - `storage` - Uploaded file storage
//! - `http` - axum routes

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod stripe;
