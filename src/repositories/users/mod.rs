//! 사용자 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 외부 사용자 저장소가 제공해야 하는 계약은 [`UserStore`] 하나입니다.
//! `users` 컬렉션은 `uuid`를 키로 하며 `email`에 유니크 제약이 있어야 합니다.
//!
//! | 구현체 | 백엔드 |
//! |--------|--------|
//! | [`MongoUserStore`] | MongoDB (`email`, `uuid` 유니크 인덱스) |
//! | [`SupabaseUserStore`] | Supabase PostgREST (`users` 테이블) |
//! | [`MemoryUserStore`] | 프로세스 내 맵 (로컬 개발/테스트) |
//!
//! # Examples
//!
//! ```rust,ignore
//! let store = connect_user_store(&config.store, config.http_timeout).await?;
//! let user = store.find_by_email("user@example.com").await?;
//! ```

pub mod memory_repo;
pub mod supabase_repo;
pub mod user_repo;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::config::StoreConfig;
use crate::db::Database;
use crate::domain::entities::users::User;
use crate::errors::AppResult;

pub use memory_repo::MemoryUserStore;
pub use supabase_repo::SupabaseUserStore;
pub use user_repo::MongoUserStore;

/// 삽입 결과
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// 저장소가 돌려준 (또는 그대로 저장된) 레코드
    Inserted(User),
    /// 같은 이메일의 레코드가 이미 있어 유니크 제약에 걸림
    DuplicateEmail,
}

/// 외부 사용자 저장소 계약
///
/// select-by-field, insert, update-by-key 세 가지 연산만 요구합니다.
/// 이메일 유니크 보장은 저장소의 책임이며, 위반 시 `insert`는
/// 에러 대신 [`InsertOutcome::DuplicateEmail`]을 돌려줘야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<User>>;

    async fn insert(&self, user: &User) -> AppResult<InsertOutcome>;

    /// `uuid`로 찾은 레코드의 `last_sign_in_at`만 갱신합니다.
    async fn update_last_sign_in(&self, uuid: &str, at: DateTime<Utc>) -> AppResult<()>;
}

/// 설정에 맞는 사용자 저장소에 연결합니다.
///
/// MongoDB의 경우 유니크 인덱스까지 생성한 뒤 반환합니다.
pub async fn connect_user_store(
    config: &StoreConfig,
    timeout: Duration,
) -> AppResult<Arc<dyn UserStore>> {
    match config {
        StoreConfig::MongoDb { uri, database } => {
            let database = Database::connect(uri, database, timeout).await?;
            let store = MongoUserStore::new(database);
            store.create_indexes().await?;
            Ok(Arc::new(store))
        }
        StoreConfig::Supabase { url, key } => {
            Ok(Arc::new(SupabaseUserStore::new(url, key, timeout)?))
        }
        StoreConfig::Memory => {
            log::warn!("⚠️ 인메모리 사용자 저장소 사용 중 - 재시작 시 모든 사용자가 사라집니다");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
