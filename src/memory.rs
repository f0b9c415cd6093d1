//! In-process implementation of the repository traits.
//!
//! Used by the test suite and by `STORAGE_BACKEND=memory` runs. It enforces
//! the same uniqueness and ordering rules as the PostgreSQL schema: emails are
//! unique ignoring case, each user has at most one token, and owned records
//! are listed by name descending with insertion order breaking ties.

use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::auth::{repo::TokenRepo, repo_types::AuthToken};
use crate::recipe::{
    repo::OwnedRepo,
    repo_types::{OwnedRecord, ResourceKind},
};
use crate::user::{
    repo::{InsertUserError, UserRepo},
    repo_types::{NewUser, User, UserChanges},
};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    /// Keyed by token value.
    tokens: HashMap<String, AuthToken>,
    /// Insertion-ordered.
    records: Vec<(ResourceKind, OwnedRecord)>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `is_active`, the way an admin would deactivate an account.
    #[cfg(test)]
    pub(crate) async fn set_active(&self, user_id: Uuid, active: bool) -> bool {
        let mut inner = self.inner.write().await;
        match inner.users.get_mut(&user_id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, InsertUserError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(InsertUserError::DuplicateEmail);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            is_active: true,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> anyhow::Result<Option<User>> {
        let mut inner = self.inner.write().await;
        let Some(user) = inner.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl TokenRepo for MemoryStore {
    async fn replace_for_user(&self, user_id: Uuid, key: &str) -> anyhow::Result<AuthToken> {
        let mut inner = self.inner.write().await;
        anyhow::ensure!(inner.users.contains_key(&user_id), "unknown user {user_id}");
        anyhow::ensure!(!inner.tokens.contains_key(key), "token key collision");

        inner.tokens.retain(|_, t| t.user_id != user_id);
        let token = AuthToken {
            key: key.to_string(),
            user_id,
            created_at: OffsetDateTime::now_utc(),
        };
        inner.tokens.insert(token.key.clone(), token.clone());
        Ok(token)
    }

    async fn find_user_by_key(&self, key: &str) -> anyhow::Result<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .tokens
            .get(key)
            .and_then(|t| inner.users.get(&t.user_id))
            .cloned())
    }
}

#[async_trait]
impl OwnedRepo for MemoryStore {
    async fn list_owned(&self, kind: ResourceKind, owner: Uuid) -> anyhow::Result<Vec<OwnedRecord>> {
        let inner = self.inner.read().await;
        let mut rows: Vec<OwnedRecord> = inner
            .records
            .iter()
            .filter(|(k, r)| *k == kind && r.user_id == owner)
            .map(|(_, r)| r.clone())
            .collect();
        // Byte order, matching `COLLATE "C"` in Postgres. Stable sort keeps
        // insertion order among equal names.
        rows.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(rows)
    }

    async fn insert_owned(
        &self,
        kind: ResourceKind,
        owner: Uuid,
        name: &str,
    ) -> anyhow::Result<OwnedRecord> {
        let mut inner = self.inner.write().await;
        anyhow::ensure!(inner.users.contains_key(&owner), "unknown owner {owner}");
        let record = OwnedRecord {
            id: Uuid::new_v4(),
            user_id: owner,
            name: name.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        inner.records.push((kind, record.clone()));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password_hash: "hash".into(),
            name: String::new(),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn email_uniqueness_ignores_case() {
        let store = MemoryStore::new();
        store.insert(new_user("Bob@example.com")).await.unwrap();
        let err = store.insert(new_user("bob@EXAMPLE.com")).await.unwrap_err();
        assert!(matches!(err, InsertUserError::DuplicateEmail));

        let found = store.find_by_email("BOB@example.com").await.unwrap();
        assert_eq!(found.unwrap().email, "Bob@example.com");
    }

    #[tokio::test]
    async fn one_token_per_user() {
        let store = MemoryStore::new();
        let user = store.insert(new_user("a@b.com")).await.unwrap();
        store.replace_for_user(user.id, "first").await.unwrap();
        store.replace_for_user(user.id, "second").await.unwrap();

        assert!(store.find_user_by_key("first").await.unwrap().is_none());
        let owner = store.find_user_by_key("second").await.unwrap().unwrap();
        assert_eq!(owner.id, user.id);
    }

    #[tokio::test]
    async fn token_for_unknown_user_fails() {
        let store = MemoryStore::new();
        assert!(store
            .replace_for_user(Uuid::new_v4(), "key")
            .await
            .is_err());
    }

    #[tokio::test]
    async fn update_missing_user_returns_none() {
        let store = MemoryStore::new();
        let res = store
            .update(Uuid::new_v4(), UserChanges::default())
            .await
            .unwrap();
        assert!(res.is_none());
    }

    #[tokio::test]
    async fn list_owned_filters_kind_and_owner() {
        let store = MemoryStore::new();
        let a = store.insert(new_user("a@b.com")).await.unwrap();
        let b = store.insert(new_user("b@b.com")).await.unwrap();
        store
            .insert_owned(ResourceKind::Tag, a.id, "Breakfast")
            .await
            .unwrap();
        store
            .insert_owned(ResourceKind::Ingredient, a.id, "Salt")
            .await
            .unwrap();
        store
            .insert_owned(ResourceKind::Tag, b.id, "Lunch")
            .await
            .unwrap();

        let tags = store.list_owned(ResourceKind::Tag, a.id).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Breakfast");
    }
}
