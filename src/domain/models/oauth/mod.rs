//! # OAuth Domain Models
//!
//! 프로바이더별 프로필 응답과 이를 정규화한 [`ExternalProfile`]을 정의합니다.
//!
//! ```text
//! Google userinfo ──┐
//!                   ├──► ExternalProfile { external_id, email, display_name }
//! Kakao user/me ────┘
//! ```
//!
//! `ExternalProfile`은 저장되지 않는 일시적인 값이며,
//! 이메일을 키로 로컬 사용자 레코드와 대조하는 데만 사용됩니다.

pub mod google_user;
pub mod kakao_user;

use serde_json::Value;

use crate::config::OAuthProvider;
use crate::errors::{AppError, AppResult};

pub use google_user::GoogleUserInfo;
pub use kakao_user::KakaoUserInfo;

/// 프로바이더 응답을 정규화한 프로필
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    /// 프로바이더 내부 사용자 ID
    pub external_id: String,
    pub email: String,
    pub display_name: String,
}

impl ExternalProfile {
    /// 프로바이더별 응답 형태를 정규화된 프로필로 변환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchange` - 응답 형태가 예상과 다르거나 필수 필드가 없는 경우
    pub fn from_provider_response(provider: OAuthProvider, body: Value) -> AppResult<Self> {
        let malformed = |e: serde_json::Error| {
            AppError::ProviderExchange(format!(
                "Unexpected {} profile response: {}",
                provider.display_name(),
                e
            ))
        };

        match provider {
            OAuthProvider::Google => {
                serde_json::from_value::<GoogleUserInfo>(body).map_err(malformed)?.try_into()
            }
            OAuthProvider::Kakao => Ok(serde_json::from_value::<KakaoUserInfo>(body)
                .map_err(malformed)?
                .into()),
        }
    }
}
