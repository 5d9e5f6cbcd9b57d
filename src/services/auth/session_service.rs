//! 로그인 시도와 인증된 요청을 조율하는 세션 컨트롤러
//!
//! 로그인 시도 하나는 아래 상태를 순서대로 한 번씩만 지나며,
//! 어느 단계에서든 실패하면 전체 시도가 중단됩니다. 재시도나 보상 처리는 없습니다.
//!
//! ```text
//! START → REDIRECTED_TO_PROVIDER
//!
//! CALLBACK_RECEIVED → IDENTITY_RESOLVED → TOKEN_ISSUED → REDIRECTED_TO_CLIENT
//!        │                   │                 │
//!        └───────────────────┴─────────────────┴──► FAILED
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::config::{AppConfig, OAuthProvider};
use crate::domain::entities::users::User;
use crate::errors::{AppError, AppResult};
use crate::repositories::users::UserStore;
use crate::services::auth::{ProviderRegistry, TokenService};
use crate::services::users::IdentityResolver;

/// 로그인 시도 단계 (로그용)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStage {
    Start,
    RedirectedToProvider,
    CallbackReceived,
    IdentityResolved,
    TokenIssued,
    RedirectedToClient,
    Failed,
}

impl fmt::Display for LoginStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginStage::Start => "START",
            LoginStage::RedirectedToProvider => "REDIRECTED_TO_PROVIDER",
            LoginStage::CallbackReceived => "CALLBACK_RECEIVED",
            LoginStage::IdentityResolved => "IDENTITY_RESOLVED",
            LoginStage::TokenIssued => "TOKEN_ISSUED",
            LoginStage::RedirectedToClient => "REDIRECTED_TO_CLIENT",
            LoginStage::Failed => "FAILED",
        };
        f.write_str(name)
    }
}

/// 세션 컨트롤러
///
/// 모든 구성 요소는 시작 시점에 만들어져 워커 간에 공유되며,
/// 요청 처리 중에 변경되는 공유 상태는 없습니다.
#[derive(Clone)]
pub struct SessionService {
    providers: ProviderRegistry,
    resolver: IdentityResolver,
    tokens: TokenService,
    frontend_url: String,
}

impl SessionService {
    pub fn new(
        providers: ProviderRegistry,
        resolver: IdentityResolver,
        tokens: TokenService,
        frontend_url: impl Into<String>,
    ) -> Self {
        Self {
            providers,
            resolver,
            tokens,
            frontend_url: frontend_url.into(),
        }
    }

    /// 설정과 사용자 저장소로부터 전체 구성 요소를 조립합니다.
    pub fn from_config(config: &AppConfig, store: Arc<dyn UserStore>) -> AppResult<Self> {
        Ok(Self::new(
            ProviderRegistry::from_config(config)?,
            IdentityResolver::new(store),
            TokenService::new(&config.jwt),
            config.frontend_url.clone(),
        ))
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// `START → REDIRECTED_TO_PROVIDER`
    pub fn authorization_url(&self, provider: OAuthProvider) -> String {
        let url = self.providers.get(provider).build_authorization_url();
        debug!("[{}] {} → {}", provider, LoginStage::Start, LoginStage::RedirectedToProvider);
        url
    }

    /// 콜백을 처리하고 프론트엔드로 돌아갈 리다이렉트 URL을 반환합니다.
    ///
    /// 반환값은 `{FRONTEND_URL}/auth/callback?token=<세션 토큰>` 형태입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchange` - 프로바이더가 코드 교환/프로필 조회를 거부
    /// * `AppError::ProviderUnavailable` - 프로바이더 호출 실패
    /// * `AppError::DatabaseError` - 사용자 저장소 오류
    pub async fn complete_login(&self, provider: OAuthProvider, code: &str) -> AppResult<String> {
        let result = self.run_callback(provider, code).await;
        match &result {
            Err(e @ (AppError::DatabaseError(_)
            | AppError::InternalError(_)
            | AppError::ProviderUnavailable(_))) => {
                error!("[{}] 로그인 실패 → {}: {}", provider, LoginStage::Failed, e);
            }
            Err(e) => warn!("[{}] 로그인 실패 → {}: {}", provider, LoginStage::Failed, e),
            Ok(_) => {}
        }
        result
    }

    async fn run_callback(&self, provider: OAuthProvider, code: &str) -> AppResult<String> {
        debug!("[{}] {}", provider, LoginStage::CallbackReceived);
        let client = self.providers.get(provider);

        let access_token = client.exchange_code(code).await?;
        let profile = client.fetch_profile(&access_token).await?;
        let (user, is_new) = self
            .resolver
            .resolve_or_create(&profile.email, &profile.display_name, provider)
            .await?;
        debug!("[{}] {} (new={})", provider, LoginStage::IdentityResolved, is_new);

        let token = self.tokens.issue(&user.uuid, &user.email, None)?;
        debug!("[{}] {}", provider, LoginStage::TokenIssued);

        info!("[{}] 로그인 완료: {} → {}", provider, user.email, LoginStage::RedirectedToClient);
        Ok(format!(
            "{}/auth/callback?token={}",
            self.frontend_url,
            urlencoding::encode(&token)
        ))
    }

    /// 세션 토큰으로 사용자를 인증합니다.
    ///
    /// 로그인 흐름과 무관한 상태 없는 연산이며, 인증이 필요한 모든 요청에서 사용됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Expired` / `AppError::InvalidCredential` - 토큰 검증 실패
    /// * `AppError::UserNotFound` - 토큰은 유효하지만 참조하는 사용자가 없음
    pub async fn authenticate(&self, credential: &str) -> AppResult<User> {
        let session = self.tokens.verify(credential)?;

        self.resolver
            .store()
            .find_by_uuid(&session.subject)
            .await?
            .ok_or(AppError::UserNotFound(session.subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MemoryUserStore;
    use crate::test_support::test_config;
    use chrono::{Duration, Utc};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_google(server: &MockServer, email: &str) {
        Mock::given(method("POST"))
            .and(path("/google/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "g-token" })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/google/userinfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1",
                "email": email,
                "name": "Alice"
            })))
            .mount(server)
            .await;
    }

    fn service(server: &MockServer) -> (SessionService, Arc<MemoryUserStore>) {
        let store = Arc::new(MemoryUserStore::new());
        let config = test_config(&server.uri());
        (SessionService::from_config(&config, store.clone()).unwrap(), store)
    }

    #[actix_web::test]
    async fn test_complete_login_redirects_with_verifiable_token() {
        let server = MockServer::start().await;
        mount_google(&server, "a@x.com").await;
        let (sessions, store) = service(&server);

        let redirect = sessions.complete_login(OAuthProvider::Google, "abc").await.unwrap();

        let token = redirect
            .strip_prefix("http://frontend.test/auth/callback?token=")
            .unwrap();
        let session = sessions.tokens().verify(token).unwrap();
        let user = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(session.subject, user.uuid);
        assert_eq!(session.email.as_deref(), Some("a@x.com"));
    }

    #[actix_web::test]
    async fn test_provider_rejection_persists_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/google/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
            .mount(&server)
            .await;
        let (sessions, store) = service(&server);

        let result = sessions.complete_login(OAuthProvider::Google, "abc").await;

        assert!(matches!(result, Err(AppError::ProviderExchange(m)) if m.contains("invalid_grant")));
        assert!(store.is_empty());
    }

    #[actix_web::test]
    async fn test_authenticate_returns_stored_user() {
        let server = MockServer::start().await;
        let (sessions, store) = service(&server);
        let user = User::new_social("a@x.com".into(), "A".into(), OAuthProvider::Kakao, Utc::now());
        store.insert(&user).await.unwrap();

        let token = sessions.tokens().issue(&user.uuid, &user.email, None).unwrap();

        assert_eq!(sessions.authenticate(&token).await.unwrap(), user);
    }

    #[actix_web::test]
    async fn test_authenticate_unknown_subject_is_not_found() {
        let server = MockServer::start().await;
        let (sessions, _) = service(&server);
        let token = sessions.tokens().issue("deleted-user", "gone@x.com", None).unwrap();

        assert!(matches!(
            sessions.authenticate(&token).await,
            Err(AppError::UserNotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_authenticate_expired_token() {
        let server = MockServer::start().await;
        let (sessions, _) = service(&server);
        let token = sessions
            .tokens()
            .issue("u", "a@x.com", Some(Duration::minutes(-5)))
            .unwrap();

        assert!(matches!(sessions.authenticate(&token).await, Err(AppError::Expired)));
    }
}
