//! Admin HTTP adapter.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AdminApiError;
pub use routes::admin_routes;
