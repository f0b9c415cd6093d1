use std::sync::Arc;

use tracing::info;

use crate::auth::repo::TokenRepo;
use crate::config::{AppConfig, StorageBackend};
use crate::db::PgStore;
use crate::memory::MemoryStore;
use crate::recipe::repo::OwnedRepo;
use crate::user::repo::UserRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepo>,
    pub tokens: Arc<dyn TokenRepo>,
    pub records: Arc<dyn OwnedRepo>,
}

impl AppState {
    /// Builds the state for the configured backend. Postgres migrations run here.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);
        match (config.backend.clone(), config.database.clone()) {
            (StorageBackend::Postgres, Some(db)) => {
                let store = PgStore::connect(&db).await?;
                store.migrate().await?;
                Ok(Self::from_store(config, Arc::new(store)))
            }
            (StorageBackend::Postgres, None) => {
                anyhow::bail!("postgres backend selected without database settings")
            }
            (StorageBackend::Memory, _) => {
                info!("using in-memory storage; data is lost on exit");
                Ok(Self::from_store(config, Arc::new(MemoryStore::new())))
            }
        }
    }

    /// One store serving all three repository roles.
    pub fn from_store<S>(config: Arc<AppConfig>, store: Arc<S>) -> Self
    where
        S: UserRepo + TokenRepo + OwnedRepo + 'static,
    {
        Self {
            config,
            users: store.clone(),
            tokens: store.clone(),
            records: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(AppConfig::memory()), Arc::new(MemoryStore::new()))
    }
}
