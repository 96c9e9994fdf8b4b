//! Password hashing port.

use async_trait::async_trait;

use crate::domain::account::PasswordHash;
use crate::domain::foundation::DomainError;

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> Result<PasswordHash, DomainError>;

    /// False on mismatch and on malformed stored hashes.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> bool;
}
