//! Supabase(PostgREST) 사용자 저장소 구현
//!
//! `{SUPABASE_URL}/rest/v1/users` 테이블을 REST로 다룹니다.
//! 모든 요청에 `apikey`와 `Authorization: Bearer` 헤더를 붙입니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use crate::{
    domain::entities::users::User,
    errors::{AppError, AppResult},
    repositories::users::{InsertOutcome, UserStore},
};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

pub struct SupabaseUserStore {
    http: Client,
    table_url: String,
    key: String,
}

impl SupabaseUserStore {
    /// # Arguments
    ///
    /// * `url` - 프로젝트 URL (예: `https://xyzcompany.supabase.co`)
    /// * `key` - 서비스 키
    /// * `timeout` - 요청 하나당 최대 대기 시간
    pub fn new(url: &str, key: &str, timeout: Duration) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            http,
            table_url: format!("{}/rest/v1/users", url.trim_end_matches('/')),
            key: key.to_string(),
        })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
    }

    async fn select_one(&self, column: &str, value: &str) -> AppResult<Option<User>> {
        let filter = format!("eq.{}", value);
        let response = self
            .authorized(self.http.get(&self.table_url))
            .query(&[(column, filter.as_str()), ("select", "*")])
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 요청 실패: {}", e)))?;

        let rows: Vec<User> = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 응답 파싱 실패: {}", e)))?;

        Ok(rows.into_iter().next())
    }

    async fn expect_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::DatabaseError(format!("Supabase {}: {}", status, body)))
    }
}

#[async_trait]
impl UserStore for SupabaseUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.select_one("email", email).await
    }

    async fn find_by_uuid(&self, uuid: &str) -> AppResult<Option<User>> {
        self.select_one("uuid", uuid).await
    }

    async fn insert(&self, user: &User) -> AppResult<InsertOutcome> {
        let response = self
            .authorized(self.http.post(&self.table_url))
            .header("Prefer", "return=representation")
            .json(user)
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 요청 실패: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<PostgrestError>(&body).ok();
            let unique_violation = error
                .as_ref()
                .and_then(|e| e.code.as_deref())
                .is_some_and(|code| code == UNIQUE_VIOLATION);

            if status == StatusCode::CONFLICT || unique_violation {
                log::debug!("이메일 중복으로 삽입 거부: {}", user.email);
                return Ok(InsertOutcome::DuplicateEmail);
            }

            let message = error.and_then(|e| e.message).unwrap_or(body);
            return Err(AppError::DatabaseError(format!("Supabase {}: {}", status, message)));
        }

        let rows: Vec<User> = response
            .json()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 응답 파싱 실패: {}", e)))?;

        // representation이 비어 있으면 보낸 레코드를 그대로 사용
        Ok(InsertOutcome::Inserted(
            rows.into_iter().next().unwrap_or_else(|| user.clone()),
        ))
    }

    async fn update_last_sign_in(&self, uuid: &str, at: DateTime<Utc>) -> AppResult<()> {
        let filter = format!("eq.{}", uuid);
        let response = self
            .authorized(self.http.patch(&self.table_url))
            .query(&[("uuid", filter.as_str()), ("select", "uuid")])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "last_sign_in_at": at }))
            .send()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 요청 실패: {}", e)))?;

        // 필터에 걸린 행만 돌아오므로 빈 배열이면 대상이 없던 것
        let updated: Vec<serde_json::Value> = Self::expect_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::DatabaseError(format!("Supabase 응답 파싱 실패: {}", e)))?;

        if updated.is_empty() {
            return Err(AppError::UserNotFound(format!("uuid={}", uuid)));
        }
        Ok(())
    }
}
