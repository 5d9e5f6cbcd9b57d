//! User Entity Implementation
//!
//! 소셜 로그인으로 생성되는 사용자 레코드입니다.
//! 이메일이 신원 대조 키이며, 이메일 하나당 레코드는 정확히 하나입니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::config::OAuthProvider;

/// 가입 경로 분류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    /// 외부 프로바이더를 통한 소셜 로그인
    Social,
    /// 이메일 가입 (이 게이트웨이에서는 생성하지 않음)
    Email,
}

/// 사용자 엔티티
///
/// `users` 컬렉션/테이블의 문서 구조와 1:1 대응합니다.
///
/// ## 불변 조건
///
/// - `uuid`는 최초 생성 시 한 번만 부여되며 이후 변경되지 않습니다.
/// - 이후 로그인에서는 `last_sign_in_at`만 갱신됩니다.
/// - `provider`는 레코드를 처음 만든 프로바이더로 고정됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 안정적인 사용자 식별자 (세션 토큰의 `sub`)
    pub uuid: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub display_name: String,
    /// 소셜 가입 시에는 빈 문자열
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    pub provider: OAuthProvider,
    pub provider_type: ProviderType,
    /// 계정 활성화 여부
    pub user_status: bool,
    pub created_at: DateTime<Utc>,
    pub last_sign_in_at: DateTime<Utc>,
}

impl User {
    /// 최초 소셜 로그인 사용자 생성
    ///
    /// 새 UUID를 발급하고 `created_at`과 `last_sign_in_at`을 같은 시각으로 설정합니다.
    pub fn new_social(
        email: String,
        display_name: String,
        provider: OAuthProvider,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            email,
            display_name,
            phone: String::new(),
            provider,
            provider_type: ProviderType::Social,
            user_status: true,
            created_at: now,
            last_sign_in_at: now,
        }
    }

    pub fn is_active(&self) -> bool {
        self.user_status
    }
}

/// PostgREST 행은 빈 컬럼을 `null`로 돌려줍니다.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_social_user_defaults() {
        let now = Utc::now();
        let user = User::new_social(
            "a@x.com".to_string(),
            "Alice".to_string(),
            OAuthProvider::Google,
            now,
        );

        assert!(Uuid::parse_str(&user.uuid).is_ok());
        assert_eq!(user.provider, OAuthProvider::Google);
        assert_eq!(user.provider_type, ProviderType::Social);
        assert!(user.is_active());
        assert_eq!(user.phone, "");
        assert_eq!(user.created_at, user.last_sign_in_at);
    }

    #[test]
    fn test_each_new_user_gets_a_distinct_uuid() {
        let now = Utc::now();
        let a = User::new_social("a@x.com".into(), String::new(), OAuthProvider::Kakao, now);
        let b = User::new_social("a@x.com".into(), String::new(), OAuthProvider::Kakao, now);

        assert_ne!(a.uuid, b.uuid);
    }

    #[test]
    fn test_document_shape() {
        let user = User::new_social("a@x.com".into(), "A".into(), OAuthProvider::Kakao, Utc::now());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["provider"], "kakao");
        assert_eq!(json["provider_type"], "social");
        assert_eq!(json["user_status"], true);
    }

    #[test]
    fn test_deserializes_rows_with_extra_columns() {
        let row = serde_json::json!({
            "id": 7,
            "uuid": "0b7f5f2e-0000-4000-8000-000000000000",
            "email": "a@x.com",
            "display_name": null,
            "provider": "google",
            "provider_type": "social",
            "user_status": true,
            "created_at": "2024-05-01T10:00:00Z",
            "last_sign_in_at": "2024-05-02T10:00:00Z"
        });

        let user: User = serde_json::from_value(row).unwrap_or_else(|e| panic!("{}", e));
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.phone, "");
    }
}
