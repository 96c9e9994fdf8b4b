//! Admin authorization port.

use async_trait::async_trait;

use crate::domain::admin::{AdminCapability, AdminCredential, AdminError};

/// Turns a presented credential into an [`AdminCapability`].
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    /// # Errors
    ///
    /// - `Unauthorized` when the credential is absent or not recognised
    async fn authorize(
        &self,
        credential: Option<&AdminCredential>,
    ) -> Result<AdminCapability, AdminError>;
}
