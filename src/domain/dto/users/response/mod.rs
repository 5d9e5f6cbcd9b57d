//! # 응답 DTO 모듈
//!
//! 클라이언트에게 반환되는 응답과 프로바이더로부터 받는 토큰 응답을 정의합니다.

pub mod oauth_token_response;
pub mod user_response;

pub use oauth_token_response::ProviderTokenResponse;
pub use user_response::{MessageResponse, SessionUserResponse};
