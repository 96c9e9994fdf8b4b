//! Blob storage port for uploaded content files.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Where a stored file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Storage key, used for deletion.
    pub key: String,
    /// Reference handed to viewers.
    pub url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under a fresh key that keeps the extension of `filename`.
    ///
    /// # Errors
    ///
    /// - `StorageError` when the write fails
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<StoredBlob, DomainError>;

    async fn delete(&self, key: &str) -> Result<(), DomainError>;
}
