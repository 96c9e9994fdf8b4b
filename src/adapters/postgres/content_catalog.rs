//! PostgreSQL implementation of ContentCatalog.
//!
//! The body is stored as either `text_content` or `file_url`; a check
//! constraint keeps exactly one of them set.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{corrupt, db_error};
use crate::domain::content::{AccessSetting, Content, ContentBody, ContentType, NewContent};
use crate::domain::foundation::{ContentId, DomainError, Timestamp, UserId};
use crate::ports::ContentCatalog;

const CONTENT_COLUMNS: &str = "id, coach_id, title, description, content_type, access_setting, \
                               text_content, file_url, created_at, updated_at";

pub struct PostgresContentCatalog {
    pool: PgPool,
}

impl PostgresContentCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: i64,
    coach_id: i64,
    title: String,
    description: Option<String>,
    content_type: String,
    access_setting: String,
    text_content: Option<String>,
    file_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for Content {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let body = match (row.text_content, row.file_url) {
            (_, Some(url)) => ContentBody::File { url },
            (Some(text), None) => ContentBody::Text(text),
            (None, None) => return Err(corrupt("content body", "no text or file")),
        };
        Ok(Content {
            id: ContentId::from_raw(row.id),
            coach_id: UserId::from_raw(row.coach_id),
            title: row.title,
            description: row.description,
            content_type: row
                .content_type
                .parse::<ContentType>()
                .map_err(|e| corrupt("content_type", e))?,
            access_setting: row
                .access_setting
                .parse::<AccessSetting>()
                .map_err(|e| corrupt("access_setting", e))?,
            body,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl ContentCatalog for PostgresContentCatalog {
    async fn create(&self, content: NewContent) -> Result<Content, DomainError> {
        let row: ContentRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO content (
                coach_id, title, description, content_type, access_setting, text_content, file_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            CONTENT_COLUMNS
        ))
        .bind(content.coach_id.as_i64())
        .bind(&content.title)
        .bind(content.description.as_deref())
        .bind(content.content_type.as_str())
        .bind(content.access_setting.as_str())
        .bind(content.body.text())
        .bind(content.body.file_url())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create content", e))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: ContentId) -> Result<Option<Content>, DomainError> {
        let row: Option<ContentRow> =
            sqlx::query_as(&format!("SELECT {} FROM content WHERE id = $1", CONTENT_COLUMNS))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find content", e))?;

        row.map(Content::try_from).transpose()
    }

    async fn list_by_coach(&self, coach_id: UserId) -> Result<Vec<Content>, DomainError> {
        let rows: Vec<ContentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM content WHERE coach_id = $1 ORDER BY created_at DESC, id DESC",
            CONTENT_COLUMNS
        ))
        .bind(coach_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list coach content", e))?;

        rows.into_iter().map(Content::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Content>, DomainError> {
        let rows: Vec<ContentRow> = sqlx::query_as(&format!(
            "SELECT {} FROM content ORDER BY created_at DESC, id DESC",
            CONTENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list content", e))?;

        rows.into_iter().map(Content::try_from).collect()
    }

    async fn delete(&self, id: ContentId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM content WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete content", e))?;

        Ok(result.rows_affected() > 0)
    }
}
