//! 인증 서비스 모듈
//!
//! OAuth 2.0 소셜 로그인과 세션 토큰을 담당하는 서비스들을 제공합니다.
//!
//! # Features
//!
//! - Google, Kakao OAuth 2.0 인가 코드 플로우
//! - 상태 없는 JWT 세션 토큰 발급/검증
//! - 로그인 시도 단계 조율 ([`SessionService`])
//!
//! # Security
//!
//! - HMAC 계열(HS256/384/512) 토큰 서명
//! - 토큰 만료 시간 관리 (서버 측 폐기 목록 없음)
//! - 아웃바운드 호출 타임아웃
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::SessionService;
//!
//! let sessions = SessionService::from_config(&config, store)?;
//! let login_url = sessions.authorization_url(OAuthProvider::Google);
//! let user = sessions.authenticate(token).await?;
//! ```

pub mod oauth_provider_service;
pub mod session_service;
pub mod token_service;

pub use oauth_provider_service::*;
pub use session_service::*;
pub use token_service::*;
