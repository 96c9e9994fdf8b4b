//! In-memory content catalog.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::{Content, NewContent};
use crate::domain::foundation::{ContentId, DomainError, Timestamp, UserId};
use crate::ports::ContentCatalog;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    items: BTreeMap<i64, Content>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryContentCatalog {
    state: Arc<RwLock<State>>,
}

impl InMemoryContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut items: Vec<Content>) -> Vec<Content> {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
    items
}

#[async_trait]
impl ContentCatalog for InMemoryContentCatalog {
    async fn create(&self, content: NewContent) -> Result<Content, DomainError> {
        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        let now = Timestamp::now();
        let created = Content {
            id: ContentId::from_raw(id),
            coach_id: content.coach_id,
            title: content.title,
            description: content.description,
            content_type: content.content_type,
            access_setting: content.access_setting,
            body: content.body,
            created_at: now,
            updated_at: now,
        };
        state.items.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, DomainError> {
        Ok(self.state.read().await.items.get(&id.as_i64()).cloned())
    }

    async fn list_by_coach(&self, coach_id: UserId) -> Result<Vec<Content>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first(
            state
                .items
                .values()
                .filter(|c| c.coach_id == coach_id)
                .cloned()
                .collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<Content>, DomainError> {
        let state = self.state.read().await;
        Ok(newest_first(state.items.values().cloned().collect()))
    }

    async fn delete(&self, id: ContentId) -> Result<bool, DomainError> {
        Ok(self.state.write().await.items.remove(&id.as_i64()).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{AccessSetting, ContentBody, ContentType};

    fn text(coach: i64, title: &str) -> NewContent {
        NewContent::new(
            UserId::from_raw(coach),
            title,
            None,
            ContentType::Text,
            AccessSetting::Free,
            ContentBody::Text("body".to_string()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_by_coach_newest_first() {
        let catalog = InMemoryContentCatalog::new();
        catalog.create(text(1, "first")).await.unwrap();
        catalog.create(text(2, "other coach")).await.unwrap();
        catalog.create(text(1, "second")).await.unwrap();

        let titles: Vec<_> = catalog
            .list_by_coach(UserId::from_raw(1))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let catalog = InMemoryContentCatalog::new();
        let c = catalog.create(text(1, "x")).await.unwrap();
        assert!(catalog.delete(c.id).await.unwrap());
        assert!(!catalog.delete(c.id).await.unwrap());
        assert!(catalog.find_by_id(c.id).await.unwrap().is_none());
    }
}
