//! 프로세스 내 사용자 저장소
//!
//! 로컬 개발과 테스트에서 외부 저장소 없이 게이트웨이를 띄울 때 사용합니다.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    domain::entities::users::User,
    errors::{AppError, AppResult},
    repositories::users::{InsertOutcome, UserStore},
};

/// `uuid` → [`User`] 맵
///
/// 이메일 유니크 검사와 삽입은 같은 쓰기 락 안에서 이뤄집니다.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.read().map(|users| users.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<T>(_: T) -> AppError {
    AppError::InternalError("user store lock poisoned".to_string())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(uuid).cloned())
    }

    async fn insert(&self, user: &User) -> AppResult<InsertOutcome> {
        let mut users = self.users.write().map_err(poisoned)?;

        if users.values().any(|existing| existing.email == user.email) {
            return Ok(InsertOutcome::DuplicateEmail);
        }

        users.insert(user.uuid.clone(), user.clone());
        Ok(InsertOutcome::Inserted(user.clone()))
    }

    async fn update_last_sign_in(&self, uuid: &str, at: DateTime<Utc>) -> AppResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;

        match users.get_mut(uuid) {
            Some(user) => {
                user.last_sign_in_at = at;
                Ok(())
            }
            None => Err(AppError::UserNotFound(format!("uuid={}", uuid))),
        }
    }
}
