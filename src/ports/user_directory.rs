//! User directory port.
//!
//! Identity, role, credential hash and profile fields for every account.

use async_trait::async_trait;

use crate::domain::account::{Email, NewUser, ProfileUpdate, User};
use crate::domain::foundation::{DomainError, UserId};

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// - `EmailTaken` if the email is already registered
    /// - `DatabaseError` on persistence failure
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Applies a partial profile update and returns the updated user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no user has this id
    /// - `UsernameTaken` if another user holds the requested username
    async fn update_profile(&self, id: UserId, update: &ProfileUpdate)
        -> Result<User, DomainError>;

    /// All users ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;
}
