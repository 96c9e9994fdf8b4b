//! Content items published by coaches.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ContentError;
use crate::domain::foundation::{ContentId, Timestamp, UserId};

/// File extensions accepted for uploaded content.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "png", "jpg", "jpeg", "gif", "mp4", "mov", "avi",
];

/// Kind of content a coach published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Video => "video",
        }
    }

    /// Image and video bodies live in external file storage.
    pub fn is_file_backed(&self) -> bool {
        !matches!(self, ContentType::Text)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ContentType::Text),
            "image" => Ok(ContentType::Image),
            "video" => Ok(ContentType::Video),
            other => Err(ContentError::InvalidContentType(other.to_string())),
        }
    }
}

/// Who may view a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessSetting {
    #[default]
    Free,
    Paywall,
}

impl AccessSetting {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessSetting::Free => "free",
            AccessSetting::Paywall => "paywall",
        }
    }

    pub fn is_paywalled(&self) -> bool {
        matches!(self, AccessSetting::Paywall)
    }
}

impl fmt::Display for AccessSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessSetting {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(AccessSetting::Free),
            "paywall" => Ok(AccessSetting::Paywall),
            other => Err(ContentError::InvalidAccessSetting(other.to_string())),
        }
    }
}

/// The viewable payload of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBody {
    /// Inline text.
    Text(String),
    /// Reference to a stored file.
    File { url: String },
}

impl ContentBody {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentBody::Text(t) => Some(t),
            ContentBody::File { .. } => None,
        }
    }

    pub fn file_url(&self) -> Option<&str> {
        match self {
            ContentBody::File { url } => Some(url),
            ContentBody::Text(_) => None,
        }
    }
}

/// A published content item. Owned by exactly one coach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub id: ContentId,
    pub coach_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub access_setting: AccessSetting,
    pub body: ContentBody,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Content {
    pub fn is_free(&self) -> bool {
        !self.access_setting.is_paywalled()
    }

    pub fn is_owned_by(&self, coach_id: UserId) -> bool {
        self.coach_id == coach_id
    }
}

/// A content item ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub coach_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: ContentType,
    pub access_setting: AccessSetting,
    pub body: ContentBody,
}

impl NewContent {
    /// Builds a content item, checking the body matches the content type.
    pub fn new(
        coach_id: UserId,
        title: impl Into<String>,
        description: Option<String>,
        content_type: ContentType,
        access_setting: AccessSetting,
        body: ContentBody,
    ) -> Result<Self, ContentError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ContentError::MissingTitleOrType);
        }
        match (&content_type, &body) {
            (ContentType::Text, ContentBody::Text(text)) if !text.is_empty() => {}
            (ContentType::Text, _) => return Err(ContentError::MissingTextContent),
            (_, ContentBody::File { .. }) => {}
            (_, ContentBody::Text(_)) => return Err(ContentError::MissingFile),
        }
        Ok(Self {
            coach_id,
            title,
            description,
            content_type,
            access_setting,
            body,
        })
    }
}

/// Returns the lowercase extension of `filename` if it is an accepted upload type.
pub fn allowed_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}
