use rand::{distributions::Alphanumeric, rngs::OsRng, Rng};
use tracing::{debug, info, warn};

use crate::auth::repo::TokenRepo;
use crate::error::{ApiError, ApiResult};
use crate::user::{repo::UserRepo, repo_types::User, services::verify_credentials};

pub const TOKEN_LEN: usize = 40;

/// Schemes accepted in the `Authorization` header, compared case-insensitively.
const AUTH_SCHEMES: [&str; 2] = ["Token", "Bearer"];

pub(crate) fn generate_token_key() -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Extracts the token from an `Authorization` header value such as `Token abc`.
pub(crate) fn parse_authorization(value: &str) -> Option<&str> {
    let (scheme, key) = value.trim().split_once(' ')?;
    if !AUTH_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return None;
    }
    let key = key.trim();
    if key.is_empty() || key.contains(' ') {
        return None;
    }
    Some(key)
}

/// Verifies credentials and rotates the caller's token.
pub async fn issue_token(
    users: &dyn UserRepo,
    tokens: &dyn TokenRepo,
    email: &str,
    password: &str,
) -> ApiResult<String> {
    if email.trim().is_empty() || password.is_empty() {
        warn!("token request with blank credentials");
        return Err(ApiError::Authentication(
            "email and password are required".into(),
        ));
    }

    let Some(user) = verify_credentials(users, email, password).await? else {
        warn!("token request with invalid credentials");
        return Err(ApiError::Authentication(
            "unable to authenticate with provided credentials".into(),
        ));
    };

    let key = generate_token_key();
    let token = tokens.replace_for_user(user.id, &key).await?;
    info!(user_id = %user.id, "token issued");
    Ok(token.key)
}

/// Maps a token key to an active user.
pub async fn resolve_caller(tokens: &dyn TokenRepo, key: &str) -> ApiResult<User> {
    let user = tokens
        .find_user_by_key(key)
        .await?
        .ok_or_else(|| ApiError::unauthorized("invalid token"))?;
    if !user.is_active {
        warn!(user_id = %user.id, "token for inactive user");
        return Err(ApiError::unauthorized("user inactive or deleted"));
    }
    debug!(user_id = %user.id, "caller resolved");
    Ok(user)
}
