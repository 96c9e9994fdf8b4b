//! Data Transfer Objects for content endpoints.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::domain::content::Content;
use crate::domain::foundation::{ContentId, UserId};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// JSON or url-encoded form of POST /api/content/upload, for text content.
///
/// File uploads use `multipart/form-data` with the same field names plus a
/// `file` part.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadContentRequest {
    #[serde(default, deserialize_with = "optional_id")]
    pub coach_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub access_setting: Option<String>,
    #[serde(default)]
    pub text_content: Option<String>,
}

/// Query string of GET /api/content/{id}.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewerQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub fan_id: Option<i64>,
}

/// An id given as a number or a numeric string. Blank means absent.
fn optional_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Number(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid id '{}'", text))),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadContentResponse {
    pub message: String,
    pub content_id: ContentId,
}

/// Full item, returned only to entitled viewers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentResponse {
    pub id: ContentId,
    pub coach_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub access_setting: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl From<Content> for ContentResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id,
            coach_id: content.coach_id,
            title: content.title,
            description: content.description,
            content_type: content.content_type.as_str().to_string(),
            access_setting: content.access_setting.as_str().to_string(),
            created_at: content.created_at.to_rfc3339(),
            text_content: content.body.text().map(str::to_string),
            file_url: content.body.file_url().map(str::to_string),
        }
    }
}

/// Listing entry. Never carries the body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentSummaryResponse {
    pub id: ContentId,
    pub coach_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub content_type: String,
    pub access_setting: String,
    pub created_at: String,
}

impl From<Content> for ContentSummaryResponse {
    fn from(content: Content) -> Self {
        Self {
            id: content.id,
            coach_id: content.coach_id,
            title: content.title,
            description: content.description,
            content_type: content.content_type.as_str().to_string(),
            access_setting: content.access_setting.as_str().to_string(),
            created_at: content.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::{AccessSetting, ContentBody, ContentType};
    use crate::domain::foundation::Timestamp;

    fn content(body: ContentBody, content_type: ContentType) -> Content {
        let now = Timestamp::now();
        Content {
            id: ContentId::from_raw(3),
            coach_id: UserId::from_raw(2),
            title: "Deadlift basics".to_string(),
            description: None,
            content_type,
            access_setting: AccessSetting::Paywall,
            body,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn blank_viewer_id_is_absent() {
        let query: ViewerQuery = serde_json::from_str(r#"{"fan_id": ""}"#).unwrap();
        assert_eq!(query.fan_id, None);

        let query: ViewerQuery = serde_json::from_str(r#"{"fan_id": "7"}"#).unwrap();
        assert_eq!(query.fan_id, Some(7));

        assert!(serde_json::from_str::<ViewerQuery>(r#"{"fan_id": "seven"}"#).is_err());
    }

    #[test]
    fn coach_id_accepts_number_or_string() {
        let number: UploadContentRequest = serde_json::from_str(r#"{"coach_id": 2}"#).unwrap();
        let text: UploadContentRequest = serde_json::from_str(r#"{"coach_id": "2"}"#).unwrap();
        let absent: UploadContentRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(number.coach_id, Some(2));
        assert_eq!(text.coach_id, Some(2));
        assert_eq!(absent.coach_id, None);
    }

    #[test]
    fn text_item_carries_text_only() {
        let json = serde_json::to_value(ContentResponse::from(content(
            ContentBody::Text("Hinge at the hips".to_string()),
            ContentType::Text,
        )))
        .unwrap();

        assert_eq!(json["text_content"], "Hinge at the hips");
        assert!(json.get("file_url").is_none());
        assert_eq!(json["access_setting"], "paywall");
    }

    #[test]
    fn file_item_carries_url_only() {
        let json = serde_json::to_value(ContentResponse::from(content(
            ContentBody::File {
                url: "/uploads/abc.mp4".to_string(),
            },
            ContentType::Video,
        )))
        .unwrap();

        assert_eq!(json["file_url"], "/uploads/abc.mp4");
        assert!(json.get("text_content").is_none());
    }

    #[test]
    fn summary_has_no_body() {
        let json = serde_json::to_string(&ContentSummaryResponse::from(content(
            ContentBody::Text("secret lesson".to_string()),
            ContentType::Text,
        )))
        .unwrap();

        assert!(!json.contains("secret lesson"));
    }
}
