//! 외부 프로필을 로컬 사용자 레코드로 대조하는 서비스
//!
//! 이메일이 유일한 대조 키입니다. 프로바이더가 달라도 이메일이 같으면
//! 같은 레코드를 재사용하며, 레코드의 `provider`는 최초 생성 프로바이더로 유지됩니다.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};

use crate::config::OAuthProvider;
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{InsertOutcome, UserStore};

/// 신원 대조/생성 서비스
///
/// ## 처리 흐름
///
/// ```text
/// find_by_email(email)
///     │
///     ├─ 없음 ──► insert(new_social) ─┬─ Inserted ──────► (user, true)
///     │                              └─ DuplicateEmail ─► 다시 조회 후 기존 사용자 처리
///     │
///     └─ 있음 ──► update_last_sign_in(now) ─────────────► (user, false)
/// ```
///
/// 동시에 같은 이메일로 첫 로그인이 들어오면 저장소의 유니크 제약이
/// 한쪽 삽입을 거부하고, 진 쪽은 이긴 쪽 레코드를 재사용합니다.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn UserStore>,
}

impl IdentityResolver {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// 이메일로 사용자를 찾거나 새로 만듭니다.
    ///
    /// # Returns
    ///
    /// * `(User, true)` - 새로 생성된 사용자
    /// * `(User, false)` - 기존 사용자 (`last_sign_in_at`만 갱신됨)
    ///
    /// # Errors
    ///
    /// * `AppError::DatabaseError` - 저장소 오류
    pub async fn resolve_or_create(
        &self,
        email: &str,
        display_name: &str,
        provider: OAuthProvider,
    ) -> AppResult<(User, bool)> {
        if let Some(existing) = self.store.find_by_email(email).await? {
            return self.record_sign_in(existing).await.map(|user| (user, false));
        }

        let candidate = User::new_social(
            email.to_string(),
            display_name.to_string(),
            provider,
            Utc::now(),
        );

        match self.store.insert(&candidate).await? {
            InsertOutcome::Inserted(user) => {
                info!("새 {} 사용자 등록: {}", provider.display_name(), user.email);
                Ok((user, true))
            }
            InsertOutcome::DuplicateEmail => {
                debug!("동시 첫 로그인 감지, 기존 레코드 재사용: {}", email);
                let existing = self.store.find_by_email(email).await?.ok_or_else(|| {
                    AppError::DatabaseError(format!(
                        "insert for {} was rejected as duplicate but no record exists",
                        email
                    ))
                })?;
                self.record_sign_in(existing).await.map(|user| (user, false))
            }
        }
    }

    async fn record_sign_in(&self, mut user: User) -> AppResult<User> {
        // 시계가 뒤로 가더라도 last_sign_in_at은 줄어들지 않습니다
        let now = Utc::now().max(user.last_sign_in_at);
        self.store.update_last_sign_in(&user.uuid, now).await?;
        user.last_sign_in_at = now;

        info!("기존 사용자 로그인: {}", user.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MemoryUserStore;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn resolver() -> (IdentityResolver, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        (IdentityResolver::new(store.clone()), store)
    }

    #[actix_web::test]
    async fn test_first_login_creates_social_user() {
        let (resolver, store) = resolver();

        let (user, is_new) = resolver
            .resolve_or_create("a@x.com", "Alice", OAuthProvider::Google)
            .await
            .unwrap();

        assert!(is_new);
        assert_eq!(user.provider, OAuthProvider::Google);
        assert_eq!(user.display_name, "Alice");
        assert!(user.is_active());
        assert_eq!(user.created_at, user.last_sign_in_at);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_second_login_reuses_uuid_with_non_decreasing_timestamp() {
        let (resolver, store) = resolver();

        let (first, _) = resolver
            .resolve_or_create("a@x.com", "Alice", OAuthProvider::Google)
            .await
            .unwrap();
        let (second, is_new) = resolver
            .resolve_or_create("a@x.com", "Alice", OAuthProvider::Google)
            .await
            .unwrap();

        assert!(!is_new);
        assert_eq!(first.uuid, second.uuid);
        assert!(second.last_sign_in_at >= first.last_sign_in_at);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn test_login_from_other_provider_keeps_original_provider() {
        let (resolver, store) = resolver();

        let (first, _) = resolver
            .resolve_or_create("a@x.com", "Alice", OAuthProvider::Google)
            .await
            .unwrap();
        let (second, is_new) = resolver
            .resolve_or_create("a@x.com", "앨리스", OAuthProvider::Kakao)
            .await
            .unwrap();

        assert!(!is_new);
        assert_eq!(second.uuid, first.uuid);
        assert_eq!(second.provider, OAuthProvider::Google);
        assert_eq!(second.display_name, "Alice");

        let stored = store.find_by_uuid(&first.uuid).await.unwrap().unwrap();
        assert_eq!(stored.provider, OAuthProvider::Google);
    }

    #[actix_web::test]
    async fn test_future_dated_sign_in_is_not_moved_backwards() {
        let (resolver, store) = resolver();
        let future = Utc::now() + Duration::hours(1);
        let user = User::new_social("a@x.com".into(), "A".into(), OAuthProvider::Kakao, future);
        store.insert(&user).await.unwrap();

        let (resolved, _) = resolver
            .resolve_or_create("a@x.com", "A", OAuthProvider::Kakao)
            .await
            .unwrap();

        assert_eq!(resolved.last_sign_in_at, future);
    }

    /// 첫 조회와 삽입 사이에 다른 요청이 같은 이메일을 먼저 저장한 상황을 재현합니다.
    struct RacingStore {
        inner: MemoryUserStore,
        winner: User,
        raced: AtomicBool,
    }

    #[async_trait]
    impl UserStore for RacingStore {
        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            if !self.raced.load(Ordering::SeqCst) {
                return Ok(None);
            }
            self.inner.find_by_email(email).await
        }

        async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<User>> {
            self.inner.find_by_uuid(uuid).await
        }

        async fn insert(&self, user: &User) -> AppResult<InsertOutcome> {
            if !self.raced.swap(true, Ordering::SeqCst) {
                self.inner.insert(&self.winner).await?;
            }
            self.inner.insert(user).await
        }

        async fn update_last_sign_in(&self, uuid: &str, at: DateTime<Utc>) -> AppResult<()> {
            self.inner.update_last_sign_in(uuid, at).await
        }
    }

    #[actix_web::test]
    async fn test_concurrent_first_login_reuses_winning_record() {
        let winner = User::new_social("a@x.com".into(), "W".into(), OAuthProvider::Google, Utc::now());
        let store = Arc::new(RacingStore {
            inner: MemoryUserStore::new(),
            winner: winner.clone(),
            raced: AtomicBool::new(false),
        });
        let resolver = IdentityResolver::new(store.clone());

        let (user, is_new) = resolver
            .resolve_or_create("a@x.com", "Loser", OAuthProvider::Kakao)
            .await
            .unwrap();

        assert!(!is_new);
        assert_eq!(user.uuid, winner.uuid);
        assert_eq!(store.inner.len(), 1);
    }
}
