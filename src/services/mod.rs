//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 모든 서비스는 시작 시점에 [`AppConfig`](crate::config::AppConfig)와
//! 사용자 저장소로부터 한 번 조립되어 `web::Data`로 공유됩니다.
//!
//! # Features
//!
//! - 소셜 로그인 플로우 조율과 세션 토큰 관리 ([`auth`])
//! - 외부 프로필과 로컬 사용자 레코드 대조 ([`users`])
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::SessionService;
//!
//! let store = connect_user_store(&config.store, config.http_timeout).await?;
//! let sessions = SessionService::from_config(&config, store)?;
//! ```

pub mod auth;
pub mod users;
