//! ListCoachContentHandler - A coach's catalog, newest first.

use std::sync::Arc;

use crate::domain::content::{Content, ContentError};
use crate::domain::foundation::UserId;
use crate::ports::{ContentCatalog, UserDirectory};

#[derive(Debug, Clone)]
pub struct ListCoachContentQuery {
    pub coach_id: UserId,
}

pub struct ListCoachContentHandler {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
}

impl ListCoachContentHandler {
    pub fn new(users: Arc<dyn UserDirectory>, catalog: Arc<dyn ContentCatalog>) -> Self {
        Self { users, catalog }
    }

    pub async fn handle(&self, query: ListCoachContentQuery) -> Result<Vec<Content>, ContentError> {
        let coach = self
            .users
            .find_by_id(query.coach_id)
            .await?
            .ok_or(ContentError::CoachNotFound(query.coach_id))?;
        if !coach.is_coach() {
            return Err(ContentError::NotACoach(coach.id));
        }

        Ok(self.catalog.list_by_coach(coach.id).await?)
    }
}
