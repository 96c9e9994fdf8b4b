//! Admin user queries.

use std::sync::Arc;

use crate::domain::account::User;
use crate::domain::admin::{AdminCapability, AdminError};
use crate::domain::foundation::UserId;
use crate::ports::UserDirectory;

pub struct ListUsersHandler {
    users: Arc<dyn UserDirectory>,
}

impl ListUsersHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, _capability: &AdminCapability) -> Result<Vec<User>, AdminError> {
        Ok(self.users.list_all().await?)
    }
}

#[derive(Debug, Clone)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

pub struct GetUserHandler {
    users: Arc<dyn UserDirectory>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        _capability: &AdminCapability,
        query: GetUserQuery,
    ) -> Result<User, AdminError> {
        self.users
            .find_by_id(query.user_id)
            .await?
            .ok_or(AdminError::UserNotFound(query.user_id))
    }
}
