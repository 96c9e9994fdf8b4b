//! Admin authorization against configured shared keys.
//!
//! Each configured key carries a label that ends up on the issued
//! capability, so audit logs name which key was used. Keys are compared in
//! constant time and every key is checked on every call.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::domain::admin::{AdminCapability, AdminCredential, AdminError};
use crate::ports::AdminAuthorizer;

pub struct SharedKeyAdminAuthorizer {
    keys: Vec<(String, SecretString)>,
}

impl SharedKeyAdminAuthorizer {
    /// Keys are labelled `admin-key-1`, `admin-key-2`, ... in order. Blank keys
    /// are dropped; with no keys every request is refused.
    pub fn new(keys: impl IntoIterator<Item = SecretString>) -> Self {
        let keys = keys
            .into_iter()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .enumerate()
            .map(|(i, k)| (format!("admin-key-{}", i + 1), k))
            .collect();
        Self { keys }
    }

    pub fn key_count(&self) -> usize {
        self.keys.len()
    }
}

#[async_trait]
impl AdminAuthorizer for SharedKeyAdminAuthorizer {
    async fn authorize(
        &self,
        credential: Option<&AdminCredential>,
    ) -> Result<AdminCapability, AdminError> {
        let Some(credential) = credential else {
            return Err(AdminError::Unauthorized);
        };

        let presented = credential.as_str().as_bytes();
        let mut matched: Option<&str> = None;
        for (label, key) in &self.keys {
            let equal: bool = key.expose_secret().as_bytes().ct_eq(presented).into();
            if equal && matched.is_none() {
                matched = Some(label);
            }
        }

        match matched {
            Some(label) => Ok(AdminCapability::issue(label)),
            None => {
                warn!("Rejected admin credential");
                Err(AdminError::Unauthorized)
            }
        }
    }
}
