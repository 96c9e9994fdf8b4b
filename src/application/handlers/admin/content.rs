//! Admin catalog moderation.

use std::sync::Arc;

use tracing::info;

use crate::domain::admin::{AdminCapability, AdminError};
use crate::domain::content::Content;
use crate::domain::foundation::ContentId;
use crate::ports::ContentCatalog;

pub struct ListAllContentHandler {
    catalog: Arc<dyn ContentCatalog>,
}

impl ListAllContentHandler {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { catalog }
    }

    /// Newest first.
    pub async fn handle(&self, _capability: &AdminCapability) -> Result<Vec<Content>, AdminError> {
        Ok(self.catalog.list_all().await?)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteContentCommand {
    pub content_id: ContentId,
}

/// Removes catalog rows only. Stored files are left in place; ledger rows
/// that reference the item keep their copy of the id.
pub struct DeleteContentHandler {
    catalog: Arc<dyn ContentCatalog>,
}

impl DeleteContentHandler {
    pub fn new(catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { catalog }
    }

    pub async fn handle(
        &self,
        capability: &AdminCapability,
        cmd: DeleteContentCommand,
    ) -> Result<(), AdminError> {
        if !self.catalog.delete(cmd.content_id).await? {
            return Err(AdminError::ContentNotFound(cmd.content_id));
        }

        info!(
            content_id = %cmd.content_id,
            admin = capability.principal(),
            "Content deleted"
        );
        Ok(())
    }
}
