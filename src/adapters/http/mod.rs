//! HTTP adapters - REST API implementations.
//!
//! One module per area, each with its own DTOs, handlers and routes. All
//! areas share a single `AppState`.

pub mod account;
pub mod admin;
pub mod content;
pub mod error;
pub mod middleware;
pub mod monetization;
pub mod router;
pub mod state;

pub use error::ErrorResponse;
pub use router::api_router;
pub use state::AppState;
