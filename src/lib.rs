//! 소셜 로그인 게이트웨이
//!
//! Google, Kakao OAuth 2.0 로그인을 처리하고 상태 없는 JWT 세션 토큰을 발급하는
//! Rust 기반 인증 서비스입니다.
//!
//! # Features
//!
//! - **소셜 로그인**: Google, Kakao 인가 코드 플로우
//! - **신원 대조**: 이메일 기준으로 로컬 사용자 레코드 생성/재사용
//! - **JWT 세션**: 서버 측 저장 없는 세션 토큰 발급/검증
//! - **저장소 선택**: MongoDB, Supabase(PostgREST), 인메모리
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/auth/*
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리, CurrentUser 추출자
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← SessionService, OAuthProviderClient, TokenService
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← UserStore
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB/Supabase│ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use social_auth_gateway::config::AppConfig;
//! use social_auth_gateway::repositories::users::connect_user_store;
//! use social_auth_gateway::services::auth::SessionService;
//!
//! let config = AppConfig::from_env()?;
//! let store = connect_user_store(&config.store, config.http_timeout).await?;
//! let sessions = SessionService::from_config(&config, store)?;
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
