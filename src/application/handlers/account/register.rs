//! RegisterHandler - Command handler for self-registration.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{AccountError, Email, NewUser, User, UserRole};
use crate::ports::{PasswordHasher, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
    /// Defaults to `fan`.
    pub role: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RegisterResult {
    pub user: User,
}

pub struct RegisterHandler {
    users: Arc<dyn UserDirectory>,
    hasher: Arc<dyn PasswordHasher>,
}

impl RegisterHandler {
    pub fn new(users: Arc<dyn UserDirectory>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: RegisterCommand) -> Result<RegisterResult, AccountError> {
        // 1. Required fields
        if cmd.email.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        // 2. Only fan and coach may be self-assigned
        let role = match cmd.role.as_deref() {
            None => UserRole::Fan,
            Some(raw) => raw
                .parse::<UserRole>()
                .ok()
                .filter(UserRole::is_self_assignable)
                .ok_or_else(|| AccountError::invalid_role(raw))?,
        };

        // 3. Uniqueness; storage enforces it again on insert
        let email = Email::new(&cmd.email)?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AccountError::EmailTaken);
        }

        // 4. Hash and store
        let password_hash = self.hasher.hash(&cmd.password).await?;
        let user = self
            .users
            .create(NewUser {
                email,
                role,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");

        Ok(RegisterResult { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::BcryptPasswordHasher;
    use crate::adapters::memory::InMemoryUserDirectory;

    fn handler(users: &InMemoryUserDirectory) -> RegisterHandler {
        RegisterHandler::new(Arc::new(users.clone()), Arc::new(BcryptPasswordHasher::new(4)))
    }

    fn command(email: &str, role: Option<&str>) -> RegisterCommand {
        RegisterCommand {
            email: email.to_string(),
            password: "s3cret".to_string(),
            role: role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn registers_fan_by_default_with_hashed_password() {
        let users = InMemoryUserDirectory::new();

        let result = handler(&users).handle(command("Fan@Example.com", None)).await.unwrap();

        assert_eq!(result.user.role, UserRole::Fan);
        assert_eq!(result.user.email.as_str(), "fan@example.com");
        assert_ne!(result.user.password_hash.as_str(), "s3cret");
    }

    #[tokio::test]
    async fn registers_coach_when_asked() {
        let users = InMemoryUserDirectory::new();
        let result = handler(&users)
            .handle(command("coach@example.com", Some("coach")))
            .await
            .unwrap();
        assert!(result.user.is_coach());
    }

    #[tokio::test]
    async fn admin_role_cannot_be_self_assigned() {
        let users = InMemoryUserDirectory::new();
        let err = handler(&users)
            .handle(command("root@example.com", Some("admin")))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid role");
        assert_eq!(users.count().await, 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let users = InMemoryUserDirectory::new();
        let h = handler(&users);
        h.handle(command("fan@example.com", None)).await.unwrap();

        let err = h.handle(command("FAN@example.com", None)).await.unwrap_err();

        assert_eq!(err, AccountError::EmailTaken);
    }

    #[tokio::test]
    async fn missing_password_is_rejected() {
        let users = InMemoryUserDirectory::new();
        let err = handler(&users)
            .handle(RegisterCommand {
                email: "fan@example.com".to_string(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err, AccountError::MissingCredentials);
    }
}
