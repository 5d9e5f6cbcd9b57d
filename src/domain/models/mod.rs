//! # Domain Models Module
//!
//! 저장되지 않는 도메인 값 객체들을 정의합니다.
//!
//! - [`oauth`] - 프로바이더 프로필 응답과 정규화된 `ExternalProfile`
//! - [`token`] - 세션 토큰 클레임과 검증 결과

pub mod oauth;
pub mod token;
