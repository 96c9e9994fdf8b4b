//! Authentication adapters.
//!
//! - `bcrypt_hasher` - `PasswordHasher` backed by bcrypt
//! - `shared_key_authorizer` - `AdminAuthorizer` over configured admin keys

mod bcrypt_hasher;
mod shared_key_authorizer;

pub use bcrypt_hasher::BcryptPasswordHasher;
pub use shared_key_authorizer::SharedKeyAdminAuthorizer;
