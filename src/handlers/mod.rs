//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Browser / Frontend (FRONTEND_URL)
//! └─────────────────────┬───────────────────────┘
//!                       │ 302 redirects, JSON
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 세션 컨트롤러, 프로바이더, 토큰         ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - UserStore 구현체                  ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며,
//! `?` 연산자로 전파된 에러는 `AppError`의 `ResponseError` 구현이
//! `{"error": ..., "message": ...}` JSON으로 변환합니다.
//!
//! ## 서비스 주입
//!
//! 서비스는 `web::Data<SessionService>`로 주입됩니다.
//! 인증이 필요한 핸들러는 [`CurrentUser`](crate::middlewares::CurrentUser) 인자를 받습니다.

pub mod auth;
