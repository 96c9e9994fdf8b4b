//! HTTP handlers for content upload, retrieval and listings.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, FromRequest, Json, Multipart, Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::state::AppState;
use crate::application::handlers::content::{
    GetContentQuery, ListCoachContentQuery, UploadContentCommand, UploadedFile,
};
use crate::domain::content::ContentError;
use crate::domain::foundation::{ContentId, DomainError, UserId};

use super::dto::{
    ContentResponse, ContentSummaryResponse, UploadContentRequest, UploadContentResponse,
    ViewerQuery,
};

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/content/upload
///
/// Accepts `multipart/form-data` (required for image and video), or a JSON
/// or `application/x-www-form-urlencoded` body (text content).
pub async fn upload_content(
    State(state): State<AppState>,
    request: Request,
) -> Result<impl IntoResponse, ContentApiError> {
    let cmd = match body_kind(request.headers()) {
        BodyKind::Multipart => {
            let multipart = Multipart::from_request(request, &state)
                .await
                .map_err(|e| malformed_body(e.body_text()))?;
            command_from_multipart(multipart).await?
        }
        BodyKind::Form => {
            let Form(body) = Form::<UploadContentRequest>::from_request(request, &state)
                .await
                .map_err(|e| malformed_body(e.body_text()))?;
            command_from_fields(body)
        }
        BodyKind::Json => {
            let body = match Json::<UploadContentRequest>::from_request(request, &state).await {
                Ok(Json(body)) => body,
                // No body at all; field checks report what is missing
                Err(JsonRejection::MissingJsonContentType(_)) => UploadContentRequest::default(),
                Err(e) => return Err(malformed_body(e.body_text()).into()),
            };
            command_from_fields(body)
        }
    };

    let result = state.upload_content_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadContentResponse {
            message: "Content uploaded successfully".to_string(),
            content_id: result.content.id,
        }),
    ))
}

enum BodyKind {
    Multipart,
    Form,
    Json,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if content_type.starts_with("multipart/form-data") {
        BodyKind::Multipart
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyKind::Form
    } else {
        BodyKind::Json
    }
}

fn malformed_body(message: String) -> ContentError {
    ContentError::ValidationFailed {
        field: "body".to_string(),
        message,
    }
}

fn command_from_fields(body: UploadContentRequest) -> UploadContentCommand {
    UploadContentCommand {
        coach_id: body.coach_id.map(UserId::from_raw),
        title: body.title,
        description: body.description,
        content_type: body.content_type,
        access_setting: body.access_setting,
        text_content: body.text_content,
        file: None,
    }
}

async fn command_from_multipart(
    mut multipart: Multipart,
) -> Result<UploadContentCommand, ContentError> {
    let mut cmd = UploadContentCommand::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| malformed_body(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ContentError::ValidationFailed {
                    field: "file".to_string(),
                    message: e.body_text(),
                })?;
            if !filename.is_empty() {
                cmd.file = Some(UploadedFile {
                    filename,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = field.text().await.map_err(|e| ContentError::ValidationFailed {
            field: name.clone(),
            message: e.body_text(),
        })?;
        let value = Some(value).filter(|v| !v.is_empty());
        match name.as_str() {
            "coach_id" => {
                cmd.coach_id = match value {
                    Some(raw) => Some(
                        raw.trim()
                            .parse::<i64>()
                            .map(UserId::from_raw)
                            .map_err(|_| ContentError::InvalidCoach)?,
                    ),
                    None => None,
                }
            }
            "title" => cmd.title = value,
            "description" => cmd.description = value,
            "content_type" => cmd.content_type = value,
            "access_setting" => cmd.access_setting = value,
            "text_content" => cmd.text_content = value,
            _ => {}
        }
    }

    Ok(cmd)
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/content/{id}?fan_id=
pub async fn get_content(
    State(state): State<AppState>,
    Path(content_id): Path<i64>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<impl IntoResponse, ContentApiError> {
    let query = GetContentQuery {
        content_id: ContentId::from_raw(content_id),
        fan_id: viewer.fan_id.map(UserId::from_raw),
    };

    let result = state.get_content_handler().handle(query).await?;

    Ok(Json(ContentResponse::from(result.content)))
}

/// GET /api/content/coach/{coach_id}
pub async fn list_coach_content(
    State(state): State<AppState>,
    Path(coach_id): Path<i64>,
) -> Result<impl IntoResponse, ContentApiError> {
    let query = ListCoachContentQuery {
        coach_id: UserId::from_raw(coach_id),
    };

    let items = state.list_coach_content_handler().handle(query).await?;

    let response: Vec<ContentSummaryResponse> =
        items.into_iter().map(ContentSummaryResponse::from).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts content errors to HTTP responses.
#[derive(Debug)]
pub struct ContentApiError(ContentError);

impl From<ContentError> for ContentApiError {
    fn from(err: ContentError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for ContentApiError {
    fn from(err: DomainError) -> Self {
        Self(ContentError::from(err))
    }
}

impl ContentApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ContentError::MissingCoachId
            | ContentError::MissingTitleOrType
            | ContentError::InvalidAccessSetting(_)
            | ContentError::InvalidContentType(_)
            | ContentError::MissingTextContent
            | ContentError::MissingFile
            | ContentError::FileTypeNotAllowed
            | ContentError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ContentError::InvalidCoach
            | ContentError::NotACoach(_)
            | ContentError::AccessDenied { .. } => StatusCode::FORBIDDEN,
            ContentError::NotFound(_) | ContentError::CoachNotFound(_) => StatusCode::NOT_FOUND,
            ContentError::Storage(_) | ContentError::Infrastructure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ContentApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let mut body = ErrorResponse::new(self.0.code(), self.0.message());
        if let ContentError::AccessDenied { reason } = self.0 {
            body = body.with_reason(reason);
        }
        body.into_response_with(status)
    }
}
