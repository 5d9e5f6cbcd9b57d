//! Users Entity Module
//!
//! 사용자 도메인의 핵심 엔티티를 정의하는 모듈입니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use crate::domain::entities::users::User;
//!
//! let user = User::new_social(
//!     "user@gmail.com".to_string(),
//!     "Google User".to_string(),
//!     OAuthProvider::Google,
//!     Utc::now(),
//! );
//! ```

pub mod user;

pub use user::{ProviderType, User};
