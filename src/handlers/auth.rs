//! Authentication HTTP Handlers
//!
//! 소셜 로그인과 세션 조회 엔드포인트를 처리하는 핸들러 함수들입니다.
//! 세션은 상태 없는 JWT로만 표현되며, 서버는 세션을 저장하지 않습니다.
//!
//! # Endpoints (`/api/auth` 스코프)
//!
//! | Method | Path | 설명 |
//! |--------|------|------|
//! | GET | `/{provider}` | 프로바이더 인가 URL로 302 |
//! | GET | `/callback/{provider}` | 코드 교환 후 프론트엔드로 302 |
//! | GET | `/session` | 현재 세션 사용자 조회 (Bearer 필요) |
//! | POST | `/logout` | 상태 없는 no-op |
use actix_web::{get, http::header, post, web, HttpResponse};
use validator::Validate;

use crate::config::OAuthProvider;
use crate::domain::{MessageResponse, OAuthCallbackQuery, SessionUserResponse};
use crate::errors::AppError;
use crate::middlewares::CurrentUser;
use crate::services::auth::SessionService;

fn redirect_to(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 소셜 로그인 시작 핸들러
///
/// # Endpoint
/// `GET /api/auth/{provider}`
///
/// # Errors
///
/// * `AppError::UnsupportedProvider` - `google`, `kakao` 이외의 경로 (404)
#[get("/{provider}")]
pub async fn login(
    provider: web::Path<String>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let provider: OAuthProvider = provider.parse()?;
    let authorization_url = sessions.authorization_url(provider);

    log::info!("{} 로그인 시작", provider.display_name());
    Ok(redirect_to(&authorization_url))
}

/// OAuth 콜백 핸들러
///
/// 프로바이더가 돌려준 인가 코드로 로그인을 완료하고
/// `{FRONTEND_URL}/auth/callback?token=<세션 토큰>`으로 리다이렉트합니다.
///
/// # Endpoint
/// `GET /api/auth/callback/{provider}?code=...`
///
/// # Errors
///
/// * `AppError::ProviderExchange` - 사용자가 동의를 거부했거나 프로바이더가 코드를 거부 (400)
/// * `AppError::ValidationError` - `code` 누락 (400)
/// * `AppError::ProviderUnavailable` - 프로바이더 호출 실패 (502)
#[get("/callback/{provider}")]
pub async fn callback(
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
    sessions: web::Data<SessionService>,
) -> Result<HttpResponse, AppError> {
    let provider: OAuthProvider = provider.parse()?;
    let query = query.into_inner();

    // 사용자가 동의를 거부한 경우
    if let Some(error) = query.error {
        let detail = match query.error_description {
            Some(description) => format!("{}: {}", error, description),
            None => error,
        };
        log::warn!("{} OAuth 에러 콜백: {}", provider.display_name(), detail);
        return Err(AppError::ProviderExchange(format!(
            "{} authorization failed: {}",
            provider.display_name(),
            detail
        )));
    }

    query
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    let code = query
        .code
        .ok_or_else(|| AppError::ValidationError("authorization code is required".to_string()))?;

    let redirect_url = sessions.complete_login(provider, &code).await?;
    Ok(redirect_to(&redirect_url))
}

/// 현재 세션 사용자 조회 핸들러
///
/// # Endpoint
/// `GET /api/auth/session`
///
/// # Headers
/// `Authorization: Bearer <세션 토큰>`
///
/// # Response
///
/// ```json
/// {
///   "uuid": "0b7f5f2e-...",
///   "email": "user@example.com",
///   "display_name": "홍길동",
///   "provider": "kakao",
///   "created_at": "2024-05-01T10:00:00Z"
/// }
/// ```
#[get("/session")]
pub async fn session(current: CurrentUser) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(SessionUserResponse::from(current.into_inner())))
}

/// 로그아웃 핸들러
///
/// 서버 측에서 무효화할 세션이 없으므로 클라이언트가 토큰을 버리는 것으로 끝납니다.
#[post("/logout")]
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"))
}
