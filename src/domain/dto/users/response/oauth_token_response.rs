//! OAuth 토큰 교환 응답 DTO 모듈
//!
//! Google과 Kakao 모두 RFC 6749 §5의 토큰 응답 형식을 따르므로 하나의 구조체로 받습니다.

use serde::Deserialize;

/// 인가 코드 교환 응답
///
/// 성공 시 `access_token`이, 실패 시 `error`(와 선택적으로 `error_description`)가 채워집니다.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderTokenResponse {
    pub access_token: Option<String>,
    pub scope: Option<String>,

    pub error: Option<String>,
    pub error_description: Option<String>,
}
