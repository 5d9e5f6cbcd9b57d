//! 세션 토큰 관리 서비스 구현
//!
//! 로그인 완료 시점에 발급되는 상태 없는(stateless) 세션 토큰을 다룹니다.
//! 검증에는 서명 키와 현재 시각만 필요하며, 서버 측 저장이나 폐기 목록은 없습니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::JwtConfig;
use crate::domain::models::token::{SessionClaims, VerifiedSession};
use crate::errors::{AppError, AppResult};

/// 세션 토큰 발급/검증 서비스
///
/// 키와 알고리즘은 생성 시점에 한 번 준비되며 이후 변경되지 않습니다.
/// 여러 워커가 공유해도 안전합니다.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            algorithm: config.algorithm,
            default_ttl: Duration::minutes(config.expiration_minutes),
        }
    }

    /// 세션 토큰 발급
    ///
    /// # Arguments
    ///
    /// * `subject` - 사용자 UUID
    /// * `email` - 사용자 이메일
    /// * `ttl` - 유효 기간. `None`이면 설정된 기본값 사용
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 만료 시각 계산 오버플로 또는 토큰 인코딩 실패
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let token = token_service.issue(&user.uuid, &user.email, None)?;
    /// ```
    pub fn issue(&self, subject: &str, email: &str, ttl: Option<Duration>) -> AppResult<String> {
        let now = Utc::now();
        let expiration = now
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or_else(|| AppError::InternalError("세션 토큰 만료 시각 범위 초과".to_string()))?;

        let claims = SessionClaims {
            sub: Some(subject.to_string()),
            email: Some(email.to_string()),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("세션 토큰 생성 실패: {}", e)))
    }

    /// 세션 토큰을 현재 시각 기준으로 검증합니다.
    pub fn verify(&self, token: &str) -> AppResult<VerifiedSession> {
        self.verify_at(token, Utc::now())
    }

    /// 세션 토큰을 주어진 시각 기준으로 검증합니다.
    ///
    /// 외부 I/O가 없는 순수 함수입니다. 만료 검사는 라이브러리의 leeway 없이
    /// `now >= exp`이면 만료로 판단합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::Expired` - 만료된 토큰
    /// * `AppError::InvalidCredential` - 서명 불일치, 형식 오류, `sub` 누락
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<VerifiedSession> {
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| AppError::InvalidCredential(e.to_string()))?;

        if now.timestamp() >= claims.exp {
            return Err(AppError::Expired);
        }

        let subject = claims
            .sub
            .filter(|sub| !sub.is_empty())
            .ok_or_else(|| AppError::InvalidCredential("missing subject".to_string()))?;

        Ok(VerifiedSession {
            subject,
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}

/// Bearer 토큰에서 실제 토큰 부분 추출
///
/// HTTP Authorization 헤더의 "Bearer {token}" 형식에서 토큰 부분만을 추출합니다.
/// 스킴 이름은 대소문자를 구분하지 않습니다.
///
/// # Errors
///
/// * `AppError::Unauthenticated` - 잘못된 헤더 형식 또는 빈 토큰
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    let (scheme, token) = auth_header
        .trim()
        .split_once(' ')
        .ok_or_else(|| AppError::Unauthenticated("expected `Bearer <token>`".to_string()))?;

    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AppError::Unauthenticated("expected `Bearer <token>`".to_string()));
    }

    Ok(token)
}
