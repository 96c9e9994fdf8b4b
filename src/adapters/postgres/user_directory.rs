//! PostgreSQL implementation of UserDirectory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt, db_error, violates};
use crate::domain::account::{Email, NewUser, PasswordHash, ProfileUpdate, User, UserRole};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::UserDirectory;

const USER_COLUMNS: &str =
    "id, email, username, role, password_hash, profile_picture_url, bio, created_at";

pub struct PostgresUserDirectory {
    pool: PgPool,
}

impl PostgresUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    username: Option<String>,
    role: String,
    password_hash: String,
    profile_picture_url: Option<String>,
    bio: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from_raw(row.id),
            email: Email::new(&row.email).map_err(|e| corrupt("email", e))?,
            username: row.username,
            role: row.role.parse::<UserRole>().map_err(|e| corrupt("role", e))?,
            password_hash: PasswordHash::from_stored(row.password_hash),
            profile_picture_url: row.profile_picture_url,
            bio: row.bio,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (email, role, password_hash) VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(user.email.as_str())
        .bind(user.role.as_str())
        .bind(user.password_hash.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "users_email_key") {
                return DomainError::new(ErrorCode::EmailTaken, "Email address already registered");
            }
            db_error("create user", e)
        })?;

        row.try_into()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find user", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find user by email", e))?;

        row.map(User::try_from).transpose()
    }

    async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<User, DomainError> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            r#"
            UPDATE users SET
                username = COALESCE($2, username),
                profile_picture_url = COALESCE($3, profile_picture_url),
                bio = COALESCE($4, bio)
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id.as_i64())
        .bind(update.username.as_deref())
        .bind(update.profile_picture_url.as_deref())
        .bind(update.bio.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if violates(&e, "users_username_key") {
                return DomainError::new(ErrorCode::UsernameTaken, "Username already taken");
            }
            db_error("update profile", e)
        })?;

        row.ok_or_else(|| DomainError::new(ErrorCode::UserNotFound, format!("User {} not found", id)))?
            .try_into()
    }

    async fn list_all(&self) -> Result<Vec<User>, DomainError> {
        let rows: Vec<UserRow> =
            sqlx::query_as(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| db_error("list users", e))?;

        rows.into_iter().map(User::try_from).collect()
    }
}
