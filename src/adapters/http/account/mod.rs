//! Account HTTP adapter: registration, login and profiles.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::AccountApiError;
pub use routes::{profile_routes, user_routes};
