//! # Data Transfer Objects
//!
//! HTTP 계층과 서비스 계층 사이에서 오가는 요청/응답 구조체입니다.
//! 엔티티를 그대로 노출하지 않고 필요한 필드만 골라 직렬화합니다.

pub mod users;

pub use users::*;
