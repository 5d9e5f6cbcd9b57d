//! # Configuration Module
//!
//! 게이트웨이의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 시작 시점에 [`AppConfig::from_env`]로 한 번 로드되어
//! 불변 값으로 각 서비스 생성자에 명시적으로 전달됩니다.
//! 요청 처리 중에 환경 변수를 다시 읽지 않습니다.
//!
//! ## 모듈 구성
//!
//! - [`auth_config`] - JWT, OAuth 프로바이더 관련 설정
//! - [`data_config`] - 사용자 저장소, 서버, Rate Limiting 설정
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::AppConfig;
//!
//! let config = AppConfig::from_env()?;
//! println!("Server will bind to {}", config.server.bind_address());
//! ```
//!
//! ## 선택적 환경 변수
//!
//! ```bash
//! export FRONTEND_URL="http://localhost:5173"
//! export CORS_ALLOWED_ORIGINS="http://localhost:5173,http://localhost:4173"
//! export OAUTH_HTTP_TIMEOUT_SECS="10"
//! ```

pub mod auth_config;
pub mod data_config;

pub use auth_config::*;
pub use data_config::*;

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

/// 키-값 조회 함수 위의 얇은 래퍼
///
/// 공백뿐인 값은 설정되지 않은 것으로 취급합니다.
pub(crate) struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl<'a> EnvSource<'a> {
    pub(crate) fn new(lookup: &'a dyn Fn(&str) -> Option<String>) -> Self {
        Self { lookup }
    }

    pub(crate) fn get(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    pub(crate) fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::Missing(key))
    }

    pub(crate) fn or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub(crate) fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: Display,
    {
        match self.get(key) {
            Some(raw) => raw.parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                reason: format!("`{}`: {}", raw, e),
            }),
            None => Ok(default),
        }
    }
}

/// 프로세스 전역 설정
///
/// 시작 시점에 한 번 생성되며 이후 변경되지 않습니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub cors_origins: Vec<String>,
    pub jwt: JwtConfig,
    pub google: OAuthClientConfig,
    pub kakao: OAuthClientConfig,
    /// 로그인 완료 후 토큰과 함께 리다이렉트할 프론트엔드 주소
    pub frontend_url: String,
    pub store: StoreConfig,
    /// 프로바이더/저장소로 나가는 HTTP 호출 하나당 최대 대기 시간
    pub http_timeout: Duration,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    ///
    /// # Errors
    ///
    /// 필수 값이 없거나 형식이 잘못된 경우 [`ConfigError`]를 반환합니다.
    /// 호출자는 이 에러를 치명적으로 취급하고 서버를 기동하지 않아야 합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 임의의 키 조회 함수로부터 설정을 로드합니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = EnvSource::new(&lookup);

        let cors_origins = env
            .or("CORS_ALLOWED_ORIGINS", "http://localhost:5173,http://localhost:4173")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let timeout_secs: u64 = env.parse_or("OAUTH_HTTP_TIMEOUT_SECS", 10)?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "OAUTH_HTTP_TIMEOUT_SECS",
                reason: "must be at least 1 second".to_string(),
            });
        }

        Ok(Self {
            server: ServerConfig::load(&env)?,
            rate_limit: RateLimitConfig::load(&env)?,
            cors_origins,
            jwt: JwtConfig::load(&env)?,
            google: OAuthClientConfig::load(&env, OAuthProvider::Google)?,
            kakao: OAuthClientConfig::load(&env, OAuthProvider::Kakao)?,
            frontend_url: env
                .or("FRONTEND_URL", "http://localhost:5173")
                .trim_end_matches('/')
                .to_string(),
            store: StoreConfig::load(&env)?,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// 프로바이더 변형에 묶인 OAuth 클라이언트 설정
    pub fn oauth_client(&self, provider: OAuthProvider) -> &OAuthClientConfig {
        match provider {
            OAuthProvider::Google => &self.google,
            OAuthProvider::Kakao => &self.kakao,
        }
    }
}
