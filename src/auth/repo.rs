use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::repo_types::AuthToken;
use crate::db::PgStore;
use crate::user::repo_types::User;

#[async_trait]
pub trait TokenRepo: Send + Sync {
    /// Stores `key` as the user's token, replacing any previous one.
    async fn replace_for_user(&self, user_id: Uuid, key: &str) -> anyhow::Result<AuthToken>;
    /// Resolves a token key to its owner.
    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>>;
}

#[async_trait]
impl TokenRepo for PgStore {
    async fn replace_for_user(&self, user_id: Uuid, key: &str) -> anyhow::Result<AuthToken> {
        let token = sqlx::query_as::<_, AuthToken>(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id)
            DO UPDATE SET key = EXCLUDED.key, created_at = now()
            RETURNING key, user_id, created_at
            "#,
        )
        .bind(key)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(token)
    }

    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.email, u.password_hash, u.name,
                   u.is_active, u.is_staff, u.is_superuser, u.created_at
              FROM auth_tokens t
              JOIN users u ON u.id = t.user_id
             WHERE t.key = $1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
