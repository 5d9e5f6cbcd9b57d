//! 데이터 및 서버 설정 관리 모듈
//!
//! 사용자 저장소, 서버 바인딩, Rate Limiting 관련 설정을 관리합니다.

use crate::config::EnvSource;
use crate::errors::ConfigError;

/// 사용자 저장소 백엔드 선택
///
/// `USER_STORE` 환경 변수로 선택합니다.
///
/// ```bash
/// # MongoDB (기본값)
/// export USER_STORE="mongodb"
/// export MONGODB_URI="mongodb://localhost:27017"
/// export DATABASE_NAME="social_auth"
///
/// # Supabase (PostgREST)
/// export USER_STORE="supabase"
/// export SUPABASE_URL="https://xyzcompany.supabase.co"
/// export SUPABASE_KEY="service-role-key"
///
/// # 로컬 개발용 인메모리 저장소 (재시작 시 초기화)
/// export USER_STORE="memory"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    MongoDb { uri: String, database: String },
    Supabase { url: String, key: String },
    Memory,
}

impl StoreConfig {
    pub(crate) fn load(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let kind = env.or("USER_STORE", "mongodb").to_lowercase();

        match kind.as_str() {
            "mongodb" | "mongo" => Ok(StoreConfig::MongoDb {
                uri: env.or("MONGODB_URI", "mongodb://localhost:27017"),
                database: env.or("DATABASE_NAME", "social_auth"),
            }),
            "supabase" => Ok(StoreConfig::Supabase {
                url: env.required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                key: env.required("SUPABASE_KEY")?,
            }),
            "memory" => Ok(StoreConfig::Memory),
            other => Err(ConfigError::Invalid {
                key: "USER_STORE",
                reason: format!("unknown user store `{}`", other),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreConfig::MongoDb { .. } => "mongodb",
            StoreConfig::Supabase { .. } => "supabase",
            StoreConfig::Memory => "memory",
        }
    }
}

/// HTTP 서버 바인딩 설정
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub(crate) fn load(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: env.or("HOST", "127.0.0.1"),
            port: env.parse_or("PORT", 3000)?,
            workers: env.parse_or("SERVER_WORKERS", 4)?,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rate Limiting 설정
///
/// ```bash
/// # .env.dev (개발 환경)
/// RATE_LIMIT_PER_SECOND=20
/// RATE_LIMIT_BURST_SIZE=40
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub(crate) fn load(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            per_second: env.parse_or("RATE_LIMIT_PER_SECOND", 100)?,
            burst_size: env.parse_or("RATE_LIMIT_BURST_SIZE", 200)?,
        })
    }
}
