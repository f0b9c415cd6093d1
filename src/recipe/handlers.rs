use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{dto::CreateRecordRequest, repo_types::OwnedRecord, services, Resource};
use crate::{auth::extractors::AuthUser, error::ApiResult, state::AppState};

/// GET and POST on `R::PATH`.
pub fn resource_routes<R: Resource>() -> Router<AppState> {
    Router::new().route(R::PATH, get(list_records::<R>).post(create_record::<R>))
}

#[instrument(skip(state, caller), fields(resource = R::LABEL, user_id = %caller.id))]
pub async fn list_records<R: Resource>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> ApiResult<Json<Vec<OwnedRecord>>> {
    let records = services::list::<R>(state.records.as_ref(), &caller).await?;
    Ok(Json(records))
}

#[instrument(skip(state, caller, payload), fields(resource = R::LABEL, user_id = %caller.id))]
pub async fn create_record<R: Resource>(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OwnedRecord>)> {
    let Json(payload) = payload?;
    let record = services::create::<R>(state.records.as_ref(), &caller, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(record)))
}
