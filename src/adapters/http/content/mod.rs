//! Content HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContentApiError;
pub use routes::content_routes;
