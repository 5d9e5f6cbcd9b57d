use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::OAuthProvider;
use crate::domain::entities::users::User;

/// `GET /api/auth/session` 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUserResponse {
    pub uuid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub provider: OAuthProvider,
    pub created_at: DateTime<Utc>,
}

impl From<User> for SessionUserResponse {
    fn from(user: User) -> Self {
        let User {
            uuid,
            email,
            display_name,
            provider,
            created_at,
            ..
        } = user;

        Self {
            uuid,
            email,
            display_name: (!display_name.is_empty()).then_some(display_name),
            provider,
            created_at,
        }
    }
}

/// 단순 메시지 응답 (`/`, 로그아웃)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
