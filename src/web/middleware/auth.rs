//! Session authentication extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::db::UserId;
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session";

/// Pull the session token from `Authorization: Bearer` or the session cookie.
///
/// The header wins when both are present.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());

    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|token| !token.is_empty())
    })
}

/// Extractor for authenticated callers.
///
/// Resolves the presented token through the session gateway once per
/// request; handlers receive the user id explicitly.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Authenticated user.
    pub user_id: UserId,
    /// The token that authenticated this request.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing session token"))?;

        let user_id = state.gateway().require(Some(token.as_str())).await.map_err(|e| {
            tracing::debug!("session rejected: {}", e);
            ApiError::from(e)
        })?;

        Ok(AuthUser { user_id, token })
    }
}
