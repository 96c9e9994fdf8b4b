//! HTTP handlers for registration, login and profiles.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::adapters::http::error::{ErrorResponse, MessageResponse};
use crate::adapters::http::state::AppState;
use crate::application::handlers::account::{
    GetProfileQuery, LoginCommand, RegisterCommand, UpdateProfileCommand,
};
use crate::domain::account::AccountError;
use crate::domain::foundation::{DomainError, UserId};

use super::dto::{
    LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, UpdateProfileRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/user/register
pub async fn register(
    State(state): State<AppState>,
    request: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, AccountApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let cmd = RegisterCommand {
        email: request.email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
        role: request.role,
    };

    state.register_handler().handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /api/user/login
pub async fn login(
    State(state): State<AppState>,
    request: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, AccountApiError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let cmd = LoginCommand {
        email: request.email.unwrap_or_default(),
        password: request.password.unwrap_or_default(),
    };

    let result = state.login_handler().handle(cmd).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user_id: result.user.id,
        role: result.user.role.as_str().to_string(),
    }))
}

/// PUT /api/profile/{id}
pub async fn update_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    request: Option<Json<UpdateProfileRequest>>,
) -> Result<impl IntoResponse, AccountApiError> {
    let update = request.map(|Json(r)| r).unwrap_or_default().into();
    let cmd = UpdateProfileCommand {
        user_id: UserId::from_raw(user_id),
        update,
    };

    state.update_profile_handler().handle(cmd).await?;

    Ok(Json(MessageResponse::new("Profile updated successfully")))
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/profile/{id}
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AccountApiError> {
    let query = GetProfileQuery {
        user_id: UserId::from_raw(user_id),
    };

    let user = state.get_profile_handler().handle(query).await?;

    Ok(Json(ProfileResponse::from(user)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts account errors to HTTP responses.
#[derive(Debug)]
pub struct AccountApiError(AccountError);

impl From<AccountError> for AccountApiError {
    fn from(err: AccountError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for AccountApiError {
    fn from(err: DomainError) -> Self {
        Self(AccountError::from(err))
    }
}

impl AccountApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            AccountError::MissingCredentials
            | AccountError::EmailTaken
            | AccountError::UsernameTaken
            | AccountError::InvalidRole(_)
            | AccountError::NoProfileData
            | AccountError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::UserNotFound(_) => StatusCode::NOT_FOUND,
            AccountError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        ErrorResponse::new(self.0.code(), self.0.message()).into_response_with(status)
    }
}
