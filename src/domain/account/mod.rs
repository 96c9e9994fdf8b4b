//! Account module - users, roles, credentials and profiles.

mod errors;
mod user;

pub use errors::AccountError;
pub use user::{Email, NewUser, PasswordHash, ProfileUpdate, User, UserRole};
