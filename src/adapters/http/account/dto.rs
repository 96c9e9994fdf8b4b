//! Data Transfer Objects for account endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::{ProfileUpdate, User};
use crate::domain::foundation::UserId;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/user/register
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `fan` (default) or `coach`.
    #[serde(default)]
    pub role: Option<String>,
}

/// POST /api/user/login
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// PUT /api/profile/{id}. Absent keys leave the field unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_picture_url: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        ProfileUpdate {
            username: req.username,
            profile_picture_url: req.profile_picture_url,
            bio: req.bio,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub user_id: UserId,
    pub role: String,
}

/// Public profile view. Never carries the password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub email: String,
    pub username: Option<String>,
    pub role: String,
    pub profile_picture_url: Option<String>,
    pub bio: Option<String>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            username: user.username,
            role: user.role.as_str().to_string(),
            profile_picture_url: user.profile_picture_url,
            bio: user.bio,
        }
    }
}
