//! Admin module - operator capability and admin error types.

mod capability;
mod errors;

pub use capability::{AdminCapability, AdminCredential};
pub use errors::AdminError;
