//! OAuth 2.0 프로바이더 어댑터 구현
//!
//! 프로바이더 변형 하나당 인스턴스 하나가 만들어지며,
//! 변형에 묶인 [`OAuthClientConfig`] 번들만 사용합니다.
//!
//! # OAuth 2.0 플로우
//!
//! ```text
//! 1. 브라우저 ── GET /api/auth/{provider} ──► 게이트웨이
//!                                   │
//! 2. 게이트웨이 ── 302 build_authorization_url() ──► 프로바이더 동의 화면
//!                                   │
//! 3. 프로바이더 ── GET /api/auth/callback/{provider}?code=... ──► 게이트웨이
//!                                   │
//! 4. 게이트웨이 ── POST token_uri (exchange_code) ──► 프로바이더
//!                                   │
//! 5. 게이트웨이 ── GET userinfo_uri (fetch_profile) ──► 프로바이더
//! ```
//!
//! 아웃바운드 호출은 재시도하지 않으며, 설정된 타임아웃으로 제한됩니다.

use std::time::Duration;

use log::{debug, error, warn};
use reqwest::Client;
use serde_json::Value;

use crate::config::{AppConfig, OAuthClientConfig, OAuthProvider};
use crate::domain::dto::ProviderTokenResponse;
use crate::domain::models::oauth::ExternalProfile;
use crate::errors::{AppError, AppResult};

/// 프로바이더 하나에 대한 OAuth 클라이언트
#[derive(Debug, Clone)]
pub struct OAuthProviderClient {
    provider: OAuthProvider,
    config: OAuthClientConfig,
    http: Client,
}

impl OAuthProviderClient {
    /// # Errors
    ///
    /// * `AppError::InternalError` - HTTP 클라이언트 생성 실패
    pub fn new(
        provider: OAuthProvider,
        config: OAuthClientConfig,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))?;

        Ok(Self {
            provider,
            config,
            http,
        })
    }

    /// 프로바이더 인가 URL 생성
    ///
    /// 설정값만으로 결정되는 순수 함수입니다. 모든 값은 URL 인코딩됩니다.
    ///
    /// `scope`는 설정된 스코프가 있을 때만, 그 뒤로 `extra_auth_params`가 순서대로 붙습니다.
    pub fn build_authorization_url(&self) -> String {
        let mut params: Vec<(&str, String)> = vec![
            ("client_id", self.config.client_id.clone()),
            ("redirect_uri", self.config.redirect_uri.clone()),
            ("response_type", "code".to_string()),
        ];

        if !self.config.scopes.is_empty() {
            params.push(("scope", self.config.scopes.join(" ")));
        }

        params.extend(
            self.config
                .extra_auth_params
                .iter()
                .map(|(k, v)| (k.as_str(), v.clone())),
        );

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", self.config.auth_uri, query_string)
    }

    /// Authorization Code를 프로바이더 액세스 토큰으로 교환
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchange` - 응답에 `error` 필드가 있거나 비정상 상태 코드
    /// * `AppError::ProviderUnavailable` - 네트워크 오류, 타임아웃
    pub async fn exchange_code(&self, code: &str) -> AppResult<String> {
        let mut params: Vec<(&str, &str)> = vec![
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        if let Some(secret) = &self.config.client_secret {
            params.push(("client_secret", secret.as_str()));
        }

        let response = self
            .http
            .post(&self.config.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| self.unavailable("token", e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.unavailable("token", e))?;
        let token_response: ProviderTokenResponse = serde_json::from_str(&body).unwrap_or_default();

        if let Some(error) = token_response.error {
            let detail = match token_response.error_description {
                Some(description) => format!("{}: {}", error, description),
                None => error,
            };
            warn!("{} 토큰 교환 거부: {}", self.provider.display_name(), detail);
            return Err(self.token_error(&detail));
        }

        if !status.is_success() {
            warn!("{} 토큰 교환 실패 ({}): {}", self.provider.display_name(), status, body);
            return Err(self.token_error(&format!("{} {}", status.as_u16(), body)));
        }

        debug!(
            "{} 토큰 교환 성공 (scope={:?})",
            self.provider.display_name(),
            token_response.scope
        );

        token_response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| self.token_error("response did not include an access_token"))
    }

    /// 액세스 토큰으로 사용자 프로필 조회
    ///
    /// Kakao 계정에 이메일이 없으면 `kakao_{id}@example.com` 형태의
    /// 대체 이메일을 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ProviderExchange` - 비정상 상태 코드 또는 예상과 다른 응답 형태
    /// * `AppError::ProviderUnavailable` - 네트워크 오류, 타임아웃
    pub async fn fetch_profile(&self, access_token: &str) -> AppResult<ExternalProfile> {
        let request = self.http.get(&self.config.userinfo_uri).bearer_auth(access_token);
        let response = self
            .config
            .userinfo_headers
            .iter()
            .fold(request, |request, (name, value)| request.header(name, value))
            .send()
            .await
            .map_err(|e| self.unavailable("profile", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderExchange(format!(
                "Error getting {} user info: {} {}",
                self.provider.display_name(),
                status.as_u16(),
                body
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            AppError::ProviderExchange(format!(
                "Unexpected {} profile response: {}",
                self.provider.display_name(),
                e
            ))
        })?;

        ExternalProfile::from_provider_response(self.provider, body)
    }

    fn token_error(&self, detail: &str) -> AppError {
        AppError::ProviderExchange(format!(
            "Error getting {} access token: {}",
            self.provider.display_name(),
            detail
        ))
    }

    fn unavailable(&self, stage: &str, error: reqwest::Error) -> AppError {
        error!("{} {} 요청 실패: {}", self.provider.display_name(), stage, error);
        AppError::ProviderUnavailable(format!("{} {} request failed", self.provider.display_name(), stage))
    }
}

/// 프로바이더 변형별 클라이언트 묶음
///
/// 요청 진입 시점에 파싱된 [`OAuthProvider`]로 한 번 선택됩니다.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    google: OAuthProviderClient,
    kakao: OAuthProviderClient,
}

impl ProviderRegistry {
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let client = |provider: OAuthProvider| {
            OAuthProviderClient::new(
                provider,
                config.oauth_client(provider).clone(),
                config.http_timeout,
            )
        };

        Ok(Self {
            google: client(OAuthProvider::Google)?,
            kakao: client(OAuthProvider::Kakao)?,
        })
    }

    pub fn get(&self, provider: OAuthProvider) -> &OAuthProviderClient {
        match provider {
            OAuthProvider::Google => &self.google,
            OAuthProvider::Kakao => &self.kakao,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn client_config(base: &str, scopes: &[&str], secret: Option<&str>) -> OAuthClientConfig {
        OAuthClientConfig {
            client_id: "client id".to_string(),
            client_secret: secret.map(str::to_string),
            redirect_uri: "http://localhost:3000/api/auth/callback/test".to_string(),
            auth_uri: format!("{}/authorize", base),
            token_uri: format!("{}/token", base),
            userinfo_uri: format!("{}/userinfo", base),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            extra_auth_params: Vec::new(),
            userinfo_headers: Vec::new(),
        }
    }

    fn google(base: &str) -> OAuthProviderClient {
        let mut config = client_config(base, &["email", "profile"], Some("shh"));
        config.extra_auth_params = pairs(&[("access_type", "offline"), ("prompt", "consent")]);

        OAuthProviderClient::new(OAuthProvider::Google, config, Duration::from_secs(5))
        .unwrap()
    }

    fn kakao(base: &str) -> OAuthProviderClient {
        let mut config = client_config(base, &[], None);
        config.userinfo_headers = pairs(&[(
            "Content-type",
            "application/x-www-form-urlencoded;charset=utf-8",
        )]);

        OAuthProviderClient::new(OAuthProvider::Kakao, config, Duration::from_secs(5))
        .unwrap()
    }

    #[test]
    fn test_google_authorization_url() {
        let url = google("https://accounts.example.com").build_authorization_url();

        assert_eq!(
            url,
            "https://accounts.example.com/authorize?client_id=client%20id\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fauth%2Fcallback%2Ftest\
             &response_type=code&scope=email%20profile&access_type=offline&prompt=consent"
        );
    }

    #[test]
    fn test_kakao_authorization_url_has_no_scope() {
        let url = kakao("https://kauth.example.com").build_authorization_url();

        assert!(url.starts_with("https://kauth.example.com/authorize?client_id=client%20id"));
        assert!(url.contains("response_type=code"));
        assert!(!url.contains("scope="));
        assert!(!url.contains("prompt="));
    }

    #[actix_web::test]
    async fn test_exchange_code_returns_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=abc"))
            .and(body_string_contains("client_secret=shh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.token",
                "token_type": "Bearer",
                "expires_in": 3599
            })))
            .expect(1)
            .mount(&server)
            .await;

        let token = google(&server.uri()).exchange_code("abc").await.unwrap();
        assert_eq!(token, "ya29.token");
    }

    #[actix_web::test]
    async fn test_exchange_code_surfaces_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "invalid_grant" })))
            .mount(&server)
            .await;

        match google(&server.uri()).exchange_code("abc").await {
            Err(AppError::ProviderExchange(message)) => {
                assert_eq!(message, "Error getting Google access token: invalid_grant");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_exchange_code_without_secret_omits_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "k" })))
            .mount(&server)
            .await;

        kakao(&server.uri()).exchange_code("abc").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("client_secret"));
    }

    #[actix_web::test]
    async fn test_exchange_code_non_success_status_is_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/token"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        match kakao(&server.uri()).exchange_code("abc").await {
            Err(AppError::ProviderExchange(message)) => {
                assert!(message.starts_with("Error getting Kakao access token: 503"));
                assert!(message.contains("maintenance"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_unreachable_provider_is_unavailable() {
        let server = MockServer::start().await;
        let base = server.uri();
        drop(server);

        assert!(matches!(
            google(&base).exchange_code("abc").await,
            Err(AppError::ProviderUnavailable(_))
        ));
    }

    #[actix_web::test]
    async fn test_fetch_profile_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header("authorization", "Bearer ya29.token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "1098",
                "email": "a@x.com",
                "name": "Alice"
            })))
            .mount(&server)
            .await;

        let profile = google(&server.uri()).fetch_profile("ya29.token").await.unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.display_name, "Alice");
    }

    #[actix_web::test]
    async fn test_kakao_profile_without_email_uses_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .and(header(
                "content-type",
                "application/x-www-form-urlencoded;charset=utf-8",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 12345,
                "kakao_account": { "profile": { "nickname": "카카오" } }
            })))
            .mount(&server)
            .await;

        let profile = kakao(&server.uri()).fetch_profile("k").await.unwrap();
        assert_eq!(profile.email, "kakao_12345@example.com");
        assert_eq!(profile.external_id, "12345");
    }

    #[actix_web::test]
    async fn test_rejected_profile_request_is_exchange_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/userinfo"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
            .mount(&server)
            .await;

        assert!(matches!(
            google(&server.uri()).fetch_profile("bad").await,
            Err(AppError::ProviderExchange(_))
        ));
    }
}
