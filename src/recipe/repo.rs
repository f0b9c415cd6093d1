use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::recipe::repo_types::{OwnedRecord, ResourceKind};

/// Storage for owner-scoped records. Every query takes the owner id; there is
/// no way to read across owners.
#[async_trait]
pub trait OwnedRepo: Send + Sync {
    /// Records of `kind` owned by `owner`, by name descending in byte order,
    /// then oldest first.
    async fn list_owned(&self, kind: ResourceKind, owner: Uuid) -> anyhow::Result<Vec<OwnedRecord>>;
    async fn insert_owned(
        &self,
        kind: ResourceKind,
        owner: Uuid,
        name: &str,
    ) -> anyhow::Result<OwnedRecord>;
}

#[async_trait]
impl OwnedRepo for PgStore {
    async fn list_owned(&self, kind: ResourceKind, owner: Uuid) -> anyhow::Result<Vec<OwnedRecord>> {
        let rows = sqlx::query_as::<_, OwnedRecord>(&format!(
            r#"
            SELECT id, user_id, name, created_at
              FROM {}
             WHERE user_id = $1
             ORDER BY name COLLATE "C" DESC, created_at ASC, id ASC
            "#,
            kind.table()
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert_owned(
        &self,
        kind: ResourceKind,
        owner: Uuid,
        name: &str,
    ) -> anyhow::Result<OwnedRecord> {
        let row = sqlx::query_as::<_, OwnedRecord>(&format!(
            r#"
            INSERT INTO {} (id, user_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, created_at
            "#,
            kind.table()
        ))
        .bind(Uuid::new_v4())
        .bind(owner)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
