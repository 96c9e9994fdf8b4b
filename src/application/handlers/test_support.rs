//! Fixtures shared by handler tests.

use crate::adapters::memory::{InMemoryContentCatalog, InMemoryUserDirectory};
use crate::domain::account::{Email, NewUser, PasswordHash, User, UserRole};
use crate::domain::content::{AccessSetting, Content, ContentBody, ContentType, NewContent};
use crate::domain::foundation::UserId;
use crate::ports::{ContentCatalog, UserDirectory};

pub async fn seed_user(users: &InMemoryUserDirectory, email: &str, role: UserRole) -> User {
    users
        .create(NewUser {
            email: Email::new(email).unwrap(),
            role,
            password_hash: PasswordHash::from_stored("$2b$04$fixturehash"),
        })
        .await
        .unwrap()
}

pub async fn seed_content(
    catalog: &InMemoryContentCatalog,
    coach_id: UserId,
    access_setting: AccessSetting,
) -> Content {
    catalog
        .create(
            NewContent::new(
                coach_id,
                "Morning drills",
                None,
                ContentType::Text,
                access_setting,
                ContentBody::Text("Ten minutes of footwork".to_string()),
            )
            .unwrap(),
        )
        .await
        .unwrap()
}
