//! Kakao `v2/user/me` 응답 모델

use serde::Deserialize;

use crate::domain::models::oauth::ExternalProfile;

/// Kakao 사용자 정보 응답
///
/// 이메일은 사용자가 동의 항목에서 제공을 거부하면 빠질 수 있습니다.
#[derive(Debug, Deserialize)]
pub struct KakaoUserInfo {
    /// Kakao 회원번호
    pub id: i64,

    #[serde(default)]
    pub kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoAccount {
    pub email: Option<String>,
    pub profile: Option<KakaoProfile>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KakaoProfile {
    pub nickname: Option<String>,
}

impl KakaoUserInfo {
    /// 이메일 미제공 사용자를 위한 대체 이메일
    ///
    /// 회원번호에서 결정적으로 만들어지므로 같은 Kakao 계정은 항상 같은 사용자로 대조됩니다.
    /// 실제 메일 수신이 불가능한 주소입니다.
    pub fn fallback_email(id: i64) -> String {
        format!("kakao_{}@example.com", id)
    }
}

impl From<KakaoUserInfo> for ExternalProfile {
    fn from(info: KakaoUserInfo) -> Self {
        let account = info.kakao_account.unwrap_or_default();
        let email = account
            .email
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| KakaoUserInfo::fallback_email(info.id));
        let display_name = account
            .profile
            .and_then(|profile| profile.nickname)
            .unwrap_or_default();

        ExternalProfile {
            external_id: info.id.to_string(),
            email,
            display_name,
        }
    }
}
