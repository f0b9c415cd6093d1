use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use super::services::{parse_authorization, resolve_caller};
use crate::{error::ApiError, state::AppState, user::repo_types::User};

/// Resolves the caller from the `Authorization` header. Every protected
/// handler takes this extractor, so a missing or unknown token is a 401
/// before the handler body runs.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("authentication credentials were not provided"))?;

        let key = parse_authorization(header).ok_or_else(|| {
            warn!("malformed authorization header");
            ApiError::unauthorized("invalid authorization header")
        })?;

        let user = resolve_caller(state.tokens.as_ref(), key).await?;
        Ok(AuthUser(user))
    }
}
