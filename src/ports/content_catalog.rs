//! Content catalog port.

use async_trait::async_trait;

use crate::domain::content::{Content, NewContent};
use crate::domain::foundation::{ContentId, DomainError, UserId};

#[async_trait]
pub trait ContentCatalog: Send + Sync {
    async fn create(&self, content: NewContent) -> Result<Content, DomainError>;

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, DomainError>;

    /// A coach's items, newest first.
    async fn list_by_coach(&self, coach_id: UserId) -> Result<Vec<Content>, DomainError>;

    /// Every item, newest first.
    async fn list_all(&self) -> Result<Vec<Content>, DomainError>;

    /// Removes an item. Returns false if it did not exist.
    async fn delete(&self, id: ContentId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_catalog_is_object_safe() {
        fn _accepts_dyn(_c: &dyn ContentCatalog) {}
    }
}
