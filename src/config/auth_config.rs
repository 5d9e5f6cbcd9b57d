//! # Authentication Configuration Module
//!
//! OAuth 프로바이더와 JWT 세션 토큰 관련 설정을 관리하는 모듈입니다.
//! 모든 값은 시작 시점에 한 번 로드되어 불변 값으로 생성자에 전달됩니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### JWT 세션 토큰
//! ```bash
//! export JWT_SECRET_KEY="your-super-secret-jwt-key"
//! export JWT_ALGORITHM="HS256"          # HS256 | HS384 | HS512
//! export JWT_EXPIRATION_MINUTES="60"
//! ```
//!
//! ### Google OAuth
//! ```bash
//! export GOOGLE_CLIENT_ID="your-google-client-id"
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! export GOOGLE_REDIRECT_URI="http://localhost:3000/api/auth/callback/google"
//! ```
//!
//! ### Kakao OAuth
//! ```bash
//! export KAKAO_CLIENT_ID="your-kakao-rest-api-key"
//! export KAKAO_CLIENT_SECRET="optional-client-secret"
//! export KAKAO_REDIRECT_URI="http://localhost:3000/api/auth/callback/kakao"
//! ```

use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use serde::{Deserialize, Serialize};

use crate::config::EnvSource;
use crate::errors::{AppError, ConfigError};

/// 지원하는 소셜 로그인 프로바이더
///
/// 요청 진입 시점(`/api/auth/{provider}`)에 한 번 파싱되며,
/// 이후에는 해당 변형에 묶인 설정 번들만 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OAuthProvider {
    /// Google OAuth 2.0
    Google,
    /// Kakao 로그인 (OAuth 2.0)
    Kakao,
}

impl OAuthProvider {
    /// 경로/저장소에서 사용하는 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Kakao => "kakao",
        }
    }

    /// 사용자에게 노출되는 에러 메시지용 이름
    pub fn display_name(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "Google",
            OAuthProvider::Kakao => "Kakao",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthProvider {
    type Err = AppError;

    /// 대소문자를 구분하지 않고 프로바이더 이름을 파싱합니다.
    ///
    /// ```rust,ignore
    /// let provider: OAuthProvider = "kakao".parse()?;
    /// assert_eq!(provider, OAuthProvider::Kakao);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "kakao" => Ok(OAuthProvider::Kakao),
            _ => Err(AppError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// 프로바이더 하나에 대한 OAuth 2.0 클라이언트 설정
///
/// 엔드포인트 URI는 실제 프로바이더 주소가 기본값이며,
/// 스테이징/테스트 환경에서는 환경 변수로 덮어쓸 수 있습니다.
///
/// ## 보안 고려사항
///
/// - `client_secret`은 로그에 출력하지 마세요
/// - 프로덕션에서는 HTTPS redirect URI만 사용하세요
#[derive(Debug, Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    /// Kakao는 클라이언트 시크릿 없이도 동작하므로 선택값입니다.
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    pub scopes: Vec<String>,
    /// 인가 URL에 추가로 붙는 쿼리 파라미터
    pub extra_auth_params: Vec<(String, String)>,
    /// 프로필 조회 요청에 추가로 붙는 헤더
    pub userinfo_headers: Vec<(String, String)>,
}

impl OAuthClientConfig {
    pub(crate) fn load(env: &EnvSource<'_>, provider: OAuthProvider) -> Result<Self, ConfigError> {
        match provider {
            OAuthProvider::Google => Ok(Self {
                client_id: env.required("GOOGLE_CLIENT_ID")?,
                client_secret: Some(env.required("GOOGLE_CLIENT_SECRET")?),
                redirect_uri: env.or(
                    "GOOGLE_REDIRECT_URI",
                    "http://localhost:3000/api/auth/callback/google",
                ),
                auth_uri: env.or("GOOGLE_AUTH_URI", "https://accounts.google.com/o/oauth2/auth"),
                token_uri: env.or("GOOGLE_TOKEN_URI", "https://oauth2.googleapis.com/token"),
                userinfo_uri: env.or(
                    "GOOGLE_USERINFO_URI",
                    "https://www.googleapis.com/oauth2/v2/userinfo",
                ),
                scopes: vec!["email".to_string(), "profile".to_string()],
                // refresh token 발급을 위해 매번 동의 화면을 띄웁니다.
                extra_auth_params: vec![
                    ("access_type".to_string(), "offline".to_string()),
                    ("prompt".to_string(), "consent".to_string()),
                ],
                userinfo_headers: Vec::new(),
            }),
            OAuthProvider::Kakao => Ok(Self {
                client_id: env.required("KAKAO_CLIENT_ID")?,
                client_secret: env.get("KAKAO_CLIENT_SECRET"),
                redirect_uri: env.or(
                    "KAKAO_REDIRECT_URI",
                    "http://localhost:3000/api/auth/callback/kakao",
                ),
                auth_uri: env.or("KAKAO_AUTH_URI", "https://kauth.kakao.com/oauth/authorize"),
                token_uri: env.or("KAKAO_TOKEN_URI", "https://kauth.kakao.com/oauth/token"),
                userinfo_uri: env.or("KAKAO_USERINFO_URI", "https://kapi.kakao.com/v2/user/me"),
                // 동의 항목은 Kakao 개발자 콘솔에서 관리됩니다.
                scopes: Vec::new(),
                extra_auth_params: Vec::new(),
                userinfo_headers: vec![(
                    "Content-type".to_string(),
                    "application/x-www-form-urlencoded;charset=utf-8".to_string(),
                )],
            }),
        }
    }
}

/// 세션 토큰 유효 기간 상한 (10년)
pub const MAX_EXPIRATION_MINUTES: i64 = 525_600 * 10;

/// JSON Web Token (JWT) 세션 토큰 설정
///
/// 서명 키와 알고리즘은 프로세스 전역에서 한 번만 로드됩니다.
/// 비밀키 기반 서명이므로 HMAC 계열 알고리즘만 허용합니다.
///
/// ## 키 생성 예제
///
/// ```bash
/// openssl rand -base64 32
/// ```
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    /// 세션 토큰 기본 유효 기간 (분)
    pub expiration_minutes: i64,
}

impl JwtConfig {
    pub(crate) fn load(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let secret = env.required("JWT_SECRET_KEY")?;

        let algorithm_name = env.or("JWT_ALGORITHM", "HS256");
        let algorithm = Algorithm::from_str(&algorithm_name).map_err(|_| ConfigError::Invalid {
            key: "JWT_ALGORITHM",
            reason: format!("unknown algorithm `{}`", algorithm_name),
        })?;
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ConfigError::Invalid {
                key: "JWT_ALGORITHM",
                reason: format!("`{}` is not a shared-secret algorithm", algorithm_name),
            });
        }

        let expiration_minutes: i64 = env.parse_or("JWT_EXPIRATION_MINUTES", 60)?;
        if expiration_minutes <= 0 {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_MINUTES",
                reason: "must be a positive number of minutes".to_string(),
            });
        }
        if expiration_minutes > MAX_EXPIRATION_MINUTES {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRATION_MINUTES",
                reason: format!("must be at most {} minutes", MAX_EXPIRATION_MINUTES),
            });
        }

        Ok(Self {
            secret,
            algorithm,
            expiration_minutes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_oauth_provider_from_string() {
        assert_eq!("google".parse::<OAuthProvider>().unwrap(), OAuthProvider::Google);
        assert_eq!("KAKAO".parse::<OAuthProvider>().unwrap(), OAuthProvider::Kakao);

        assert!(matches!(
            "naver".parse::<OAuthProvider>(),
            Err(AppError::UnsupportedProvider(name)) if name == "naver"
        ));
    }

    #[test]
    fn test_oauth_provider_serialization() {
        let json = serde_json::to_string(&OAuthProvider::Kakao).unwrap();
        assert_eq!(json, "\"kakao\"");

        let provider: OAuthProvider = serde_json::from_str("\"google\"").unwrap();
        assert_eq!(provider, OAuthProvider::Google);
    }

    #[test]
    fn test_jwt_config_defaults() {
        let vars = source(&[("JWT_SECRET_KEY", "secret")]);
        let lookup = |key: &str| vars.get(key).cloned();
        let config = JwtConfig::load(&EnvSource::new(&lookup)).unwrap();

        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.expiration_minutes, 60);
    }

    #[test]
    fn test_jwt_config_rejects_asymmetric_algorithm() {
        let vars = source(&[("JWT_SECRET_KEY", "secret"), ("JWT_ALGORITHM", "RS256")]);
        let lookup = |key: &str| vars.get(key).cloned();

        assert!(matches!(
            JwtConfig::load(&EnvSource::new(&lookup)),
            Err(ConfigError::Invalid { key: "JWT_ALGORITHM", .. })
        ));
    }

    #[test]
    fn test_jwt_config_rejects_oversized_expiration() {
        let vars = source(&[
            ("JWT_SECRET_KEY", "secret"),
            ("JWT_EXPIRATION_MINUTES", "1000000000000"),
        ]);
        let lookup = |key: &str| vars.get(key).cloned();

        assert!(matches!(
            JwtConfig::load(&EnvSource::new(&lookup)),
            Err(ConfigError::Invalid { key: "JWT_EXPIRATION_MINUTES", .. })
        ));

        let vars = source(&[
            ("JWT_SECRET_KEY", "secret"),
            ("JWT_EXPIRATION_MINUTES", MAX_EXPIRATION_MINUTES.to_string().as_str()),
        ]);
        let lookup = |key: &str| vars.get(key).cloned();
        let config = JwtConfig::load(&EnvSource::new(&lookup)).unwrap();
        assert_eq!(config.expiration_minutes, MAX_EXPIRATION_MINUTES);
    }

    #[test]
    fn test_jwt_config_requires_secret() {
        let lookup = |_: &str| -> Option<String> { None };

        assert_eq!(
            JwtConfig::load(&EnvSource::new(&lookup)).err(),
            Some(ConfigError::Missing("JWT_SECRET_KEY"))
        );
    }

    #[test]
    fn test_kakao_client_secret_is_optional() {
        let vars = source(&[("KAKAO_CLIENT_ID", "kakao-id")]);
        let lookup = |key: &str| vars.get(key).cloned();
        let config = OAuthClientConfig::load(&EnvSource::new(&lookup), OAuthProvider::Kakao).unwrap();

        assert!(config.client_secret.is_none());
        assert!(config.extra_auth_params.is_empty());
        assert_eq!(config.userinfo_headers[0].0, "Content-type");
        assert_eq!(config.redirect_uri, "http://localhost:3000/api/auth/callback/kakao");
        assert_eq!(config.token_uri, "https://kauth.kakao.com/oauth/token");
    }

    #[test]
    fn test_google_endpoints_are_overridable() {
        let vars = source(&[
            ("GOOGLE_CLIENT_ID", "gid"),
            ("GOOGLE_CLIENT_SECRET", "gsecret"),
            ("GOOGLE_TOKEN_URI", "http://127.0.0.1:9999/token"),
        ]);
        let lookup = |key: &str| vars.get(key).cloned();
        let config = OAuthClientConfig::load(&EnvSource::new(&lookup), OAuthProvider::Google).unwrap();

        assert_eq!(config.token_uri, "http://127.0.0.1:9999/token");
        assert_eq!(config.auth_uri, "https://accounts.google.com/o/oauth2/auth");
        assert_eq!(config.scopes, vec!["email", "profile"]);
        assert!(config
            .extra_auth_params
            .contains(&("prompt".to_string(), "consent".to_string())));
        assert!(config.userinfo_headers.is_empty());
    }
}
