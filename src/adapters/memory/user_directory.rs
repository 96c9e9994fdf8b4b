//! In-memory user directory.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::{Email, NewUser, ProfileUpdate, User};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserDirectory;

#[derive(Debug, Default)]
struct State {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    state: Arc<RwLock<State>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.state.read().await.users.len()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if state.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::new(
                ErrorCode::EmailTaken,
                "Email address already registered",
            ));
        }
        state.next_id += 1;
        let id = state.next_id;
        let created = User {
            id: UserId::from_raw(id),
            email: user.email,
            username: None,
            role: user.role,
            password_hash: user.password_hash,
            profile_picture_url: None,
            bio: None,
            created_at: Timestamp::now(),
        };
        state.users.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.state.read().await.users.get(&id.as_i64()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| &u.email == email).cloned())
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, DomainError> {
        let mut state = self.state.write().await;
        if let Some(username) = &update.username {
            let taken = state
                .users
                .values()
                .any(|u| u.id != id && u.username.as_deref() == Some(username.as_str()));
            if taken {
                return Err(DomainError::new(ErrorCode::UsernameTaken, "Username already taken"));
            }
        }
        let user = state
            .users
            .get_mut(&id.as_i64())
            .ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id)))?;
        update.apply_to(user);
        Ok(user.clone())
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }
}
