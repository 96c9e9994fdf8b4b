//! LoginHandler - Checks an email and password pair.
//!
//! Identifies the user only; no session or token is issued.

use std::sync::Arc;

use tracing::debug;

use crate::domain::account::{AccountError, Email, User};
use crate::ports::{PasswordHasher, UserDirectory};

#[derive(Debug, Clone, Default)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct LoginResult {
    pub user: User,
}

pub struct LoginHandler {
    users: Arc<dyn UserDirectory>,
    hasher: Arc<dyn PasswordHasher>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserDirectory>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }

    pub async fn handle(&self, cmd: LoginCommand) -> Result<LoginResult, AccountError> {
        if cmd.email.trim().is_empty() || cmd.password.is_empty() {
            return Err(AccountError::MissingCredentials);
        }

        // Malformed and unknown emails fail the same way as a bad password
        let Ok(email) = Email::new(&cmd.email) else {
            return Err(AccountError::InvalidCredentials);
        };
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !self.hasher.verify(&cmd.password, &user.password_hash).await {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        Ok(LoginResult { user })
    }
}
