//! # Domain Entities Module
//!
//! 비즈니스 도메인의 핵심 엔티티들을 정의합니다.
//! 사용자 저장소의 `users` 컬렉션 문서 구조와 직접 매핑됩니다.
//!
//! ```text
//! Domain Layer
//! ├── entities/     ← 이 모듈 (저장되는 엔티티)
//! ├── models/       ← 프로바이더 프로필, 토큰 클레임 등 값 객체
//! └── dto/          ← 데이터 전송 객체
//! ```

pub mod users;
