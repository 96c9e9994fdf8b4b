//! Content-specific error types.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingCoachId, MissingTitleOrType, InvalidAccessSetting, InvalidContentType | 400 |
//! | MissingTextContent, MissingFile, FileTypeNotAllowed, ValidationFailed | 400 |
//! | InvalidCoach, NotACoach, AccessDenied | 403 |
//! | NotFound, CoachNotFound | 404 |
//! | Storage, Infrastructure | 500 |

use crate::domain::foundation::{ContentId, DomainError, ErrorCode, UserId};

/// Errors raised by content upload, retrieval and listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    MissingCoachId,
    InvalidCoach,
    NotACoach(UserId),
    CoachNotFound(UserId),
    MissingTitleOrType,
    InvalidAccessSetting(String),
    InvalidContentType(String),
    MissingTextContent,
    MissingFile,
    FileTypeNotAllowed,
    NotFound(ContentId),
    /// Viewer is not entitled to the content; carries the user-facing reason.
    AccessDenied { reason: String },
    ValidationFailed { field: String, message: String },
    Storage(String),
    Infrastructure(String),
}

impl ContentError {
    pub fn not_found(id: ContentId) -> Self {
        ContentError::NotFound(id)
    }

    pub fn access_denied(reason: impl Into<String>) -> Self {
        ContentError::AccessDenied {
            reason: reason.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        ContentError::Storage(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ContentError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::MissingCoachId
            | ContentError::MissingTitleOrType
            | ContentError::MissingTextContent
            | ContentError::MissingFile => ErrorCode::EmptyField,
            ContentError::InvalidAccessSetting(_)
            | ContentError::InvalidContentType(_)
            | ContentError::FileTypeNotAllowed => ErrorCode::InvalidFormat,
            ContentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ContentError::InvalidCoach | ContentError::NotACoach(_) | ContentError::AccessDenied { .. } => {
                ErrorCode::Forbidden
            }
            ContentError::NotFound(_) => ErrorCode::ContentNotFound,
            ContentError::CoachNotFound(_) => ErrorCode::UserNotFound,
            ContentError::Storage(_) => ErrorCode::StorageError,
            ContentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ContentError::MissingCoachId => "Coach ID is required".to_string(),
            ContentError::InvalidCoach => "Invalid coach ID or user is not a coach".to_string(),
            ContentError::NotACoach(_) => "User is not a coach".to_string(),
            ContentError::CoachNotFound(id) => format!("User {} not found", id),
            ContentError::MissingTitleOrType => "Title and content type are required".to_string(),
            ContentError::InvalidAccessSetting(_) => {
                "Invalid access setting. Must be 'free' or 'paywall'.".to_string()
            }
            ContentError::InvalidContentType(_) => "Invalid content type".to_string(),
            ContentError::MissingTextContent => {
                "Text content is required for text type".to_string()
            }
            ContentError::MissingFile => "No file part".to_string(),
            ContentError::FileTypeNotAllowed => "File type not allowed".to_string(),
            ContentError::NotFound(_) => "Content not found".to_string(),
            ContentError::AccessDenied { .. } => "Access denied".to_string(),
            ContentError::ValidationFailed { field, message } => {
                format!("Validation failed for {}: {}", field, message)
            }
            ContentError::Storage(msg) => format!("Could not save file: {}", msg),
            ContentError::Infrastructure(msg) => format!("Internal error: {}", msg),
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContentError {}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::StorageError => ContentError::storage(err.message),
            ErrorCode::ValidationFailed => ContentError::ValidationFailed {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            _ => ContentError::infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_and_listing_use_distinct_coach_messages() {
        assert_eq!(
            ContentError::InvalidCoach.message(),
            "Invalid coach ID or user is not a coach"
        );
        assert_eq!(
            ContentError::NotACoach(UserId::from_raw(3)).message(),
            "User is not a coach"
        );
    }

    #[test]
    fn storage_domain_error_maps_to_storage() {
        let err = DomainError::new(ErrorCode::StorageError, "disk full");
        assert_eq!(ContentError::from(err), ContentError::Storage("disk full".to_string()));
    }

    #[test]
    fn access_denied_is_forbidden() {
        assert_eq!(ContentError::access_denied("x").code(), ErrorCode::Forbidden);
    }
}
