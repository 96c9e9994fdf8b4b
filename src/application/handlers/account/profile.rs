//! Profile handlers - read and partially update a user's public profile.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{AccountError, ProfileUpdate, User};
use crate::domain::foundation::UserId;
use crate::ports::UserDirectory;

#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

pub struct GetProfileHandler {
    users: Arc<dyn UserDirectory>,
}

impl GetProfileHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetProfileQuery) -> Result<User, AccountError> {
        self.users
            .find_by_id(query.user_id)
            .await?
            .ok_or(AccountError::UserNotFound(query.user_id))
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub update: ProfileUpdate,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserDirectory>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, AccountError> {
        // 1. User must exist
        if self.users.find_by_id(cmd.user_id).await?.is_none() {
            return Err(AccountError::UserNotFound(cmd.user_id));
        }

        // 2. Something to change
        if cmd.update.is_empty() {
            return Err(AccountError::NoProfileData);
        }
        if cmd.update.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            return Err(AccountError::validation("username", "must not be blank"));
        }

        // 3. Apply; username collisions come back as UsernameTaken
        let user = self.users.update_profile(cmd.user_id, &cmd.update).await?;

        info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }
}
