//! Bearer 세션 토큰 인증 추출자
//!
//! 핸들러 인자에 [`CurrentUser`]를 선언하면 해당 엔드포인트는 인증이 필요해집니다.
//!
//! ```rust,ignore
//! #[get("/session")]
//! pub async fn session(current: CurrentUser) -> Result<HttpResponse, AppError> {
//!     Ok(HttpResponse::Ok().json(SessionUserResponse::from(current.into_inner())))
//! }
//! ```
//!
//! 실패 시 응답은 [`AppError`]의 `ResponseError` 구현이 만듭니다.
//! 401 응답에는 `WWW-Authenticate: Bearer` 챌린지가 붙습니다.

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use crate::domain::entities::users::User;
use crate::errors::AppError;
use crate::services::auth::{extract_bearer_token, SessionService};

/// 세션 토큰으로 인증된 사용자
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let sessions = req.app_data::<web::Data<SessionService>>().cloned();
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().map(str::to_string));

        Box::pin(async move {
            let sessions = sessions.ok_or_else(|| {
                AppError::InternalError("session service is not registered".to_string())
            })?;

            let authorization = match authorization {
                Some(Ok(value)) => value,
                Some(Err(_)) => {
                    return Err(AppError::Unauthenticated(
                        "Authorization header is not valid text".to_string(),
                    ));
                }
                None => {
                    return Err(AppError::Unauthenticated(
                        "missing Authorization header".to_string(),
                    ));
                }
            };

            let token = extract_bearer_token(&authorization)?;
            let user = sessions.authenticate(token).await?;

            Ok(CurrentUser(user))
        })
    }
}
