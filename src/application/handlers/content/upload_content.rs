//! UploadContentHandler - Command handler for coach content uploads.

use std::sync::Arc;

use tracing::info;

use crate::domain::content::{
    allowed_extension, AccessSetting, Content, ContentBody, ContentError, ContentType, NewContent,
};
use crate::domain::foundation::UserId;
use crate::ports::{BlobStore, ContentCatalog, UserDirectory};

/// A file received with an upload.
#[derive(Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedFile")
            .field("filename", &self.filename)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

/// Upload form. Every field is optional so the handler can report exactly
/// which requirement failed.
#[derive(Debug, Clone, Default)]
pub struct UploadContentCommand {
    pub coach_id: Option<UserId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    /// Defaults to `free`.
    pub access_setting: Option<String>,
    pub text_content: Option<String>,
    pub file: Option<UploadedFile>,
}

#[derive(Debug, Clone)]
pub struct UploadContentResult {
    pub content: Content,
}

pub struct UploadContentHandler {
    users: Arc<dyn UserDirectory>,
    catalog: Arc<dyn ContentCatalog>,
    blobs: Arc<dyn BlobStore>,
}

impl UploadContentHandler {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        catalog: Arc<dyn ContentCatalog>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        Self {
            users,
            catalog,
            blobs,
        }
    }

    pub async fn handle(&self, cmd: UploadContentCommand) -> Result<UploadContentResult, ContentError> {
        // 1. Uploader must be a coach
        let coach_id = cmd.coach_id.ok_or(ContentError::MissingCoachId)?;
        let coach = self.users.find_by_id(coach_id).await?;
        if !coach.is_some_and(|u| u.is_coach()) {
            return Err(ContentError::InvalidCoach);
        }

        // 2. Title and type present
        let (Some(title), Some(content_type)) = (
            cmd.title.filter(|t| !t.trim().is_empty()),
            cmd.content_type.filter(|t| !t.trim().is_empty()),
        ) else {
            return Err(ContentError::MissingTitleOrType);
        };

        // 3. Access setting, then content type
        let access_setting = match cmd.access_setting.as_deref() {
            None | Some("") => AccessSetting::default(),
            Some(raw) => raw.parse()?,
        };
        let content_type: ContentType = content_type.parse()?;

        // 4. Body: inline text or a stored file
        let body = if content_type.is_file_backed() {
            let file = cmd.file.ok_or(ContentError::MissingFile)?;
            if file.filename.trim().is_empty() {
                return Err(ContentError::MissingFile);
            }
            if allowed_extension(&file.filename).is_none() {
                return Err(ContentError::FileTypeNotAllowed);
            }
            let stored = self.blobs.put(&file.filename, &file.bytes).await?;
            ContentBody::File { url: stored.url }
        } else {
            let text = cmd
                .text_content
                .filter(|t| !t.is_empty())
                .ok_or(ContentError::MissingTextContent)?;
            ContentBody::Text(text)
        };

        // 5. Persist
        let content = self
            .catalog
            .create(NewContent::new(
                coach_id,
                title,
                cmd.description,
                content_type,
                access_setting,
                body,
            )?)
            .await?;

        info!(
            content_id = %content.id,
            coach_id = %content.coach_id,
            content_type = %content.content_type,
            access_setting = %content.access_setting,
            "Content uploaded"
        );

        Ok(UploadContentResult { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContentCatalog, InMemoryUserDirectory};
    use crate::adapters::storage::LocalBlobStore;
    use crate::application::handlers::test_support::seed_user;
    use crate::domain::account::UserRole;
    use tempfile::TempDir;

    struct Fixture {
        users: InMemoryUserDirectory,
        catalog: InMemoryContentCatalog,
        dir: TempDir,
        handler: UploadContentHandler,
    }

    fn fixture() -> Fixture {
        let users = InMemoryUserDirectory::new();
        let catalog = InMemoryContentCatalog::new();
        let dir = TempDir::new().unwrap();
        let handler = UploadContentHandler::new(
            Arc::new(users.clone()),
            Arc::new(catalog.clone()),
            Arc::new(LocalBlobStore::new(dir.path(), "/uploads")),
        );
        Fixture {
            users,
            catalog,
            dir,
            handler,
        }
    }

    fn text_upload(coach_id: UserId) -> UploadContentCommand {
        UploadContentCommand {
            coach_id: Some(coach_id),
            title: Some("Warmup".to_string()),
            content_type: Some("text".to_string()),
            text_content: Some("Jog for five minutes".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn text_upload_defaults_to_free() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;

        let result = f.handler.handle(text_upload(coach.id)).await.unwrap();

        assert_eq!(result.content.access_setting, AccessSetting::Free);
        assert_eq!(result.content.body.text(), Some("Jog for five minutes"));
        assert_eq!(f.catalog.list_by_coach(coach.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn image_upload_stores_file_and_url() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;

        let result = f
            .handler
            .handle(UploadContentCommand {
                coach_id: Some(coach.id),
                title: Some("Form check".to_string()),
                content_type: Some("image".to_string()),
                access_setting: Some("paywall".to_string()),
                file: Some(UploadedFile {
                    filename: "squat.png".to_string(),
                    bytes: vec![0x89, 0x50, 0x4e, 0x47],
                }),
                ..Default::default()
            })
            .await
            .unwrap();

        let url = result.content.body.file_url().unwrap();
        assert!(url.starts_with("/uploads/") && url.ends_with(".png"));
        let key = url.trim_start_matches("/uploads/");
        assert!(f.dir.path().join(key).exists());
    }

    #[tokio::test]
    async fn fan_cannot_upload() {
        let f = fixture();
        let fan = seed_user(&f.users, "fan@example.com", UserRole::Fan).await;

        let err = f.handler.handle(text_upload(fan.id)).await.unwrap_err();

        assert_eq!(err, ContentError::InvalidCoach);
    }

    #[tokio::test]
    async fn validation_order_is_stable() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;

        let no_coach = f
            .handler
            .handle(UploadContentCommand::default())
            .await
            .unwrap_err();
        let no_title = f
            .handler
            .handle(UploadContentCommand {
                title: None,
                ..text_upload(coach.id)
            })
            .await
            .unwrap_err();
        let bad_access = f
            .handler
            .handle(UploadContentCommand {
                access_setting: Some("members".to_string()),
                content_type: Some("podcast".to_string()),
                ..text_upload(coach.id)
            })
            .await
            .unwrap_err();
        let no_text = f
            .handler
            .handle(UploadContentCommand {
                text_content: None,
                ..text_upload(coach.id)
            })
            .await
            .unwrap_err();

        assert_eq!(no_coach, ContentError::MissingCoachId);
        assert_eq!(no_title, ContentError::MissingTitleOrType);
        assert!(matches!(bad_access, ContentError::InvalidAccessSetting(_)));
        assert_eq!(no_text, ContentError::MissingTextContent);
    }

    #[tokio::test]
    async fn video_needs_allowed_file() {
        let f = fixture();
        let coach = seed_user(&f.users, "coach@example.com", UserRole::Coach).await;
        let video = |file: Option<UploadedFile>| UploadContentCommand {
            coach_id: Some(coach.id),
            title: Some("Sprint".to_string()),
            content_type: Some("video".to_string()),
            file,
            ..Default::default()
        };

        let missing = f.handler.handle(video(None)).await.unwrap_err();
        let wrong_type = f
            .handler
            .handle(video(Some(UploadedFile {
                filename: "sprint.mkv".to_string(),
                bytes: vec![1, 2, 3],
            })))
            .await
            .unwrap_err();

        assert_eq!(missing, ContentError::MissingFile);
        assert_eq!(wrong_type, ContentError::FileTypeNotAllowed);
        assert!(f.catalog.list_all().await.unwrap().is_empty());
    }
}
