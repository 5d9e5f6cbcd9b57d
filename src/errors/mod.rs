//! 에러 타입 모듈
//!
//! 요청 단위 에러([`AppError`])와 시작 시점 설정 에러([`ConfigError`])를 제공합니다.

pub mod errors;

pub use errors::{AppError, AppResult, ConfigError};
