//! 사용자 관련 서비스 모듈
//!
//! 외부 프로필을 로컬 사용자 레코드와 대조하는 [`IdentityResolver`]를 제공합니다.
//! 계정 삭제나 프로바이더 병합 같은 관리 기능은 없습니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::IdentityResolver;
//!
//! let resolver = IdentityResolver::new(store);
//! let (user, is_new) = resolver
//!     .resolve_or_create(&profile.email, &profile.display_name, OAuthProvider::Google)
//!     .await?;
//! ```

pub mod identity_resolver;

pub use identity_resolver::IdentityResolver;
