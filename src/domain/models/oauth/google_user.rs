//! Google `oauth2/v2/userinfo` 응답 모델

use serde::Deserialize;

use crate::domain::models::oauth::ExternalProfile;
use crate::errors::AppError;

/// Google 사용자 정보 응답
///
/// `email profile` 스코프로 요청했을 때 반환되는 필드 중 필요한 것만 매핑합니다.
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 ID
    pub id: String,

    pub email: Option<String>,

    /// 전체 이름 (없을 수 있음)
    pub name: Option<String>,
}

impl TryFrom<GoogleUserInfo> for ExternalProfile {
    type Error = AppError;

    /// `email` 스코프를 요청했으므로 이메일이 없으면 교환 실패로 취급합니다.
    fn try_from(info: GoogleUserInfo) -> Result<Self, Self::Error> {
        let email = info
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| {
                AppError::ProviderExchange(
                    "Google profile response did not include an email".to_string(),
                )
            })?;

        Ok(ExternalProfile {
            external_id: info.id,
            email,
            display_name: info.name.unwrap_or_default(),
        })
    }
}
