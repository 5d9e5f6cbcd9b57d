//! # Domain Layer
//!
//! 엔티티, 값 객체, DTO를 정의합니다. 외부 I/O에 의존하지 않습니다.

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
