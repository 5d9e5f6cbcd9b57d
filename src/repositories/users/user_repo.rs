//! # MongoDB 사용자 저장소 구현
//!
//! `users` 컬렉션을 [`UserStore`] 계약에 맞춰 다루는 리포지토리입니다.
//!
//! ## 특징
//!
//! - **데이터 무결성**: `email`, `uuid` 유니크 인덱스로 중복 레코드 방지
//! - **부분 업데이트**: 재로그인 시 `$set`으로 `last_sign_in_at`만 변경

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::{
    bson::{self, doc},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    domain::entities::users::User,
    errors::{AppError, AppResult},
    repositories::users::{InsertOutcome, UserStore},
};

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// MongoDB 기반 사용자 저장소
///
/// ## 컬렉션 구조
///
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), uuid(unique)
///
/// ## 에러 처리
///
/// 드라이버 오류는 모두 [`AppError::DatabaseError`]로 변환됩니다.
/// 단, 삽입 시 중복 키(11000)는 에러가 아니라
/// [`InsertOutcome::DuplicateEmail`]로 보고됩니다.
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let database = Database::connect(uri, "social_auth", timeout).await?;
/// let store = MongoUserStore::new(database);
/// store.create_indexes().await?;
///
/// let found = store.find_by_email("john@example.com").await?;
/// ```
pub struct MongoUserStore {
    db: Database,
}

impl MongoUserStore {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.get_database().collection::<User>(Self::COLLECTION)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 애플리케이션 초기화 시점에 한 번 실행합니다.
    ///
    /// # 생성되는 인덱스
    ///
    /// 1. **이메일 유니크 인덱스** - 중복 이메일 방지 및 신원 대조 조회
    /// 2. **UUID 유니크 인덱스** - 세션 토큰 `sub`로 사용자 조회
    ///
    /// # 주의사항
    ///
    /// 이미 중복 데이터가 있는 경우 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let uuid_index = IndexModel::builder()
            .keys(doc! { "uuid": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("uuid_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, uuid_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("사용자 컬렉션 인덱스 준비 완료: {}", self.db.database_name());
        Ok(())
    }
}

fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "uuid": uuid })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 새 사용자 저장
    ///
    /// 사전 중복 조회 없이 유니크 인덱스에 판단을 맡깁니다.
    async fn insert(&self, user: &User) -> AppResult<InsertOutcome> {
        match self.collection().insert_one(user).await {
            Ok(_) => Ok(InsertOutcome::Inserted(user.clone())),
            Err(e) if is_duplicate_key(&e) => {
                log::debug!("이메일 중복으로 삽입 거부: {}", user.email);
                Ok(InsertOutcome::DuplicateEmail)
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn update_last_sign_in(&self, uuid: &str, at: DateTime<Utc>) -> AppResult<()> {
        // 엔티티 직렬화와 같은 표현으로 저장해야 조회 시 역직렬화가 맞습니다
        let at = bson::to_bson(&at).map_err(|e| AppError::InternalError(e.to_string()))?;

        let result = self.collection()
            .update_one(doc! { "uuid": uuid }, doc! { "$set": { "last_sign_in_at": at } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        if result.matched_count == 0 {
            return Err(AppError::UserNotFound(format!("uuid={}", uuid)));
        }

        Ok(())
    }
}
