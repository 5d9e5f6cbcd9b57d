//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사(Cross-cutting concerns)를 담당합니다.
//!
//! # 제공 구성 요소
//!
//! ### 1. 인증 추출자 (CurrentUser)
//! - `Authorization: Bearer <token>` 헤더에서 세션 토큰 추출
//! - 토큰 검증 후 사용자 저장소에서 레코드 조회
//! - 실패 시 401 (`WWW-Authenticate: Bearer`) 또는 404
//!
//! ### 2. 애플리케이션 전역 미들웨어
//! CORS, Rate Limiting, 요청 로깅, 경로 정규화는 `main.rs`에서
//! `actix-cors`, `actix-governor`, `actix_web::middleware`로 구성합니다.
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use crate::middlewares::CurrentUser;
//!
//! #[get("/session")]
//! async fn session(current: CurrentUser) -> HttpResponse {
//!     HttpResponse::Ok().json(SessionUserResponse::from(current.into_inner()))
//! }
//! ```

pub mod current_user;

pub use current_user::CurrentUser;
