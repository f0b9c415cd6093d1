use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{TokenRequest, TokenResponse},
        services::issue_token,
    },
    error::ApiResult,
    state::AppState,
};

pub fn token_routes() -> Router<AppState> {
    Router::new().route("/user/token", post(create_token))
}

#[instrument(skip(state, payload))]
pub async fn create_token(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let Json(payload) = payload?;
    let token = issue_token(
        state.users.as_ref(),
        state.tokens.as_ref(),
        &payload.email,
        &payload.password,
    )
    .await?;
    Ok(Json(TokenResponse { token }))
}
