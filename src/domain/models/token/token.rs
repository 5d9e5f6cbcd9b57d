//! 세션 토큰 클레임 구조체
//!
//! RFC 7519 JWT 표준 클레임 중 이 게이트웨이가 사용하는 최소 집합입니다.
use serde::{Deserialize, Serialize};

/// 세션 토큰의 클레임(Payload)
///
/// ## 클레임 구성
///
/// - `sub`: 사용자 UUID
/// - `email`: 사용자 이메일
/// - `iat`: 발급 시각 (Unix timestamp, 초)
/// - `exp`: 만료 시각 (Unix timestamp, 초)
///
/// `sub`는 검증 단계에서 존재 여부를 직접 확인하기 위해 `Option`으로 받습니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
}

/// 검증을 통과한 세션 토큰에서 꺼낸 신원 정보
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedSession {
    pub subject: String,
    pub email: Option<String>,
    /// 만료 시각 (Unix timestamp, 초)
    pub expires_at: i64,
}
