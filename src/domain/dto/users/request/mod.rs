//! # 인증 관련 요청 DTO 모듈

pub mod auth_request;

pub use auth_request::OAuthCallbackQuery;
