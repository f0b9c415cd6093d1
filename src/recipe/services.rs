use tracing::{info, warn};

use super::{
    repo::OwnedRepo,
    repo_types::OwnedRecord,
    Resource,
};
use crate::error::{ApiError, ApiResult};
use crate::user::{repo_types::User, services::MAX_NAME_LEN};

/// The caller's own records of type `R`.
pub async fn list<R: Resource>(repo: &dyn OwnedRepo, caller: &User) -> ApiResult<Vec<OwnedRecord>> {
    Ok(repo.list_owned(R::KIND, caller.id).await?)
}

/// Creates a record of type `R` owned by the caller.
pub async fn create<R: Resource>(
    repo: &dyn OwnedRepo,
    caller: &User,
    name: &str,
) -> ApiResult<OwnedRecord> {
    let name = name.trim();
    if name.is_empty() {
        warn!(resource = R::LABEL, "blank name");
        return Err(ApiError::validation("name may not be blank"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        warn!(resource = R::LABEL, "name too long");
        return Err(ApiError::validation(format!(
            "name must be at most {MAX_NAME_LEN} characters"
        )));
    }

    let record = repo.insert_owned(R::KIND, caller.id, name).await?;
    info!(resource = R::LABEL, id = %record.id, user_id = %caller.id, "record created");
    Ok(record)
}
