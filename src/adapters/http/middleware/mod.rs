//! HTTP middleware and extractors for axum.
//!
//! - `admin` - Admin capability extractor

pub mod admin;

pub use admin::{AdminRejection, RequireAdmin, ADMIN_AUTH_HEADER};
