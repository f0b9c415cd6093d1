use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::extractors::AuthUser,
    error::{method_not_allowed, ApiResult},
    state::AppState,
    user::{
        dto::{CreateUserRequest, PublicUser, UpdateProfileRequest},
        services,
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/user/create", post(create_user))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route(
        "/user/me",
        get(get_me).patch(update_me).fallback(method_not_allowed),
    )
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let Json(payload) = payload?;
    let user = services::create_user(
        state.users.as_ref(),
        &payload.email,
        &payload.password,
        payload.name.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(caller), fields(user_id = %caller.id))]
pub async fn get_me(AuthUser(caller): AuthUser) -> Json<PublicUser> {
    Json(caller.into())
}

#[instrument(skip(state, caller, payload), fields(user_id = %caller.id))]
pub async fn update_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<Json<PublicUser>> {
    let Json(payload) = payload?;
    let user = services::update_profile(
        state.users.as_ref(),
        &caller,
        payload.name,
        payload.password,
    )
    .await?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_carries_password() {
        let user = crate::user::repo_types::User {
            id: uuid::Uuid::new_v4(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$v=19$hash".to_string(),
            name: "Test".to_string(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: time::OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": "test@example.com", "name": "Test" })
        );
    }
}
