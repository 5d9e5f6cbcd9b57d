//! 애플리케이션 전역에서 사용하는 에러 시스템
//!
//! 소셜 로그인 게이트웨이를 위한 통합 에러 처리 시스템입니다.
//! `thiserror`와 `actix_web::ResponseError`를 사용하여 모든 요청 단위 에러를
//! 일관된 JSON 응답으로 변환합니다.
//!
//! 모든 에러는 현재 요청에 대해 종결적이며 자동 재시도는 없습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::AppError;
//!
//! fn require_code(code: Option<String>) -> Result<String, AppError> {
//!     code.ok_or_else(|| AppError::ValidationError("code is required".to_string()))
//! }
//! ```

use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use thiserror::Error;

/// 요청 처리 중 발생하는 에러 타입
#[derive(Error, Debug)]
pub enum AppError {
    /// 프로바이더가 인가 코드/토큰 교환을 거부함 (400 Bad Request)
    #[error("{0}")]
    ProviderExchange(String),

    /// 프로바이더 호출 자체가 실패함 (502 Bad Gateway)
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// 서명/형식/subject 검증 실패 (401 Unauthorized)
    #[error("Invalid token: {0}")]
    InvalidCredential(String),

    /// 만료된 세션 토큰 (401 Unauthorized)
    #[error("Token has expired")]
    Expired,

    /// Authorization 헤더 누락 또는 형식 오류 (401 Unauthorized)
    #[error("Authentication required: {0}")]
    Unauthenticated(String),

    /// 토큰은 유효하지만 참조하는 사용자가 없음 (404 Not Found)
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// 지원하지 않는 프로바이더 경로 (404 Not Found)
    #[error("Unsupported auth provider: {0}")]
    UnsupportedProvider(String),

    /// 입력값 검증 에러 (400 Bad Request)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 사용자 저장소 에러 (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 내부 서버 에러 (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 응답 본문의 `error` 필드에 들어가는 식별자
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::ProviderExchange(_) => "provider_exchange_error",
            AppError::ProviderUnavailable(_) => "provider_unavailable",
            AppError::InvalidCredential(_) => "invalid_credential",
            AppError::Expired => "expired",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::UserNotFound(_) => "user_not_found",
            AppError::UnsupportedProvider(_) => "unsupported_provider",
            AppError::ValidationError(_) => "validation_error",
            AppError::DatabaseError(_) => "database_error",
            AppError::InternalError(_) => "internal_error",
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ProviderExchange(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidCredential(_) | AppError::Expired | AppError::Unauthenticated(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::UserNotFound(_) | AppError::UnsupportedProvider(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 401 응답에는 항상 `WWW-Authenticate: Bearer` 챌린지를 붙입니다.
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }

        builder.json(serde_json::json!({
            "error": self.kind(),
            "message": self.to_string()
        }))
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 시작 시점 설정 로딩 에러
///
/// 요청 단위 에러가 아니며, 발생하면 서버를 기동하지 않습니다.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("required configuration `{0}` is not set")]
    Missing(&'static str),

    #[error("invalid configuration `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}
