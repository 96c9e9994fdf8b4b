//! Local filesystem blob store.
//!
//! Uploaded files are written under one directory with a random name that
//! keeps the original extension. The public URL is `{public_base_url}/{key}`.
//!
//! Writes go to `{key}.tmp` first and are renamed into place, so a crash
//! never leaves a truncated file under a served name.

use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::content::allowed_extension;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{BlobStore, StoredBlob};

/// Largest accepted upload (100 MB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalBlobStore {
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(key)
    }

    /// Keys are generated here; anything with a path separator is foreign.
    fn is_valid_key(key: &str) -> bool {
        !key.is_empty() && !key.contains(['/', '\\']) && !key.starts_with('.')
    }
}

fn storage_error(context: &str, err: std::io::Error) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("{}: {}", context, err))
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(&self, filename: &str, bytes: &[u8]) -> Result<StoredBlob, DomainError> {
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("File exceeds {} bytes", MAX_UPLOAD_BYTES),
            ));
        }
        let extension = allowed_extension(filename)
            .ok_or_else(|| DomainError::validation("file", "File type not allowed"))?;

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| storage_error("create upload directory", e))?;

        let key = format!("{}.{}", uuid::Uuid::new_v4().simple(), extension);
        let final_path = self.path_for(&key);
        let temp_path = self.path_for(&format!("{}.tmp", key));

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| storage_error("create file", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| storage_error("write file", e))?;
        file.sync_all()
            .await
            .map_err(|e| storage_error("sync file", e))?;
        drop(file);

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| storage_error("rename file", e))?;

        debug!(key = %key, size_bytes = bytes.len(), "Stored upload");

        Ok(StoredBlob {
            url: format!("{}/{}", self.public_base_url, key),
            key,
        })
    }

    async fn delete(&self, key: &str) -> Result<(), DomainError> {
        if !Self::is_valid_key(key) {
            return Err(DomainError::validation("key", "Invalid storage key"));
        }
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error("delete file", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> LocalBlobStore {
        LocalBlobStore::new(dir.path(), "http://localhost:8080/uploads/")
    }

    #[tokio::test]
    async fn put_writes_file_under_random_name() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let blob = store.put("Holiday Clip.MP4", b"fake video").await.unwrap();

        assert!(blob.key.ends_with(".mp4"));
        assert!(!blob.key.contains("Holiday"));
        assert_eq!(blob.url, format!("http://localhost:8080/uploads/{}", blob.key));
        let written = tokio::fs::read(dir.path().join(&blob.key)).await.unwrap();
        assert_eq!(written, b"fake video");
    }

    #[tokio::test]
    async fn put_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        store(&dir).put("notes.txt", b"hello").await.unwrap();

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().ends_with(".tmp"));
        }
    }

    #[tokio::test]
    async fn disallowed_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let err = store(&dir).put("payload.exe", b"MZ").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn delete_is_idempotent_and_refuses_paths() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let blob = store.put("a.png", b"png").await.unwrap();

        store.delete(&blob.key).await.unwrap();
        store.delete(&blob.key).await.unwrap();

        assert!(!dir.path().join(&blob.key).exists());
        assert!(store.delete("../etc/passwd").await.is_err());
    }
}
