//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 사용자 저장소 계약([`users::UserStore`])과 백엔드별 구현을 제공합니다.
//! 서비스 계층은 구체 타입이 아니라 `Arc<dyn UserStore>`에만 의존합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::users::connect_user_store;
//!
//! let store = connect_user_store(&config.store, config.http_timeout).await?;
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod users;
