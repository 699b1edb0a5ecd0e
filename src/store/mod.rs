pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::config::{Config, StoreBackend};
use crate::db::Database;
use crate::models::note::{NewNote, Note};

pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

/// Error types for note store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence capability the notes service is built on. Every method is a
/// single round trip; nothing is retried.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Persist one row and return it as stored, with `created_at` assigned
    /// by the store.
    async fn insert(&self, note: NewNote) -> Result<Note, StoreError>;

    /// All notes whose message id matches exactly, oldest first. Ties keep
    /// insertion order.
    async fn list_by_message_id(&self, message_id: &str) -> Result<Vec<Note>, StoreError>;

    /// Remove at most one row. Returns whether a row was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Remove every row. Returns the number of rows removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}

/// Factory for creating note stores
pub struct NoteStoreFactory;

impl NoteStoreFactory {
    /// Connects the configured backend. For PostgreSQL this also brings the
    /// schema up to date; the caller must not serve traffic if it fails.
    pub async fn from_config(config: &Config) -> anyhow::Result<Arc<dyn NoteStore>> {
        info!("Creating note store: {:?}", config.store_backend);

        match config.store_backend {
            StoreBackend::Postgres => {
                let db = Database::new(config).await?;
                info!("Database connected");

                db.run_migrations().await?;
                info!("Database migrations completed");

                Ok(Arc::new(PgNoteStore::new(db)))
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory note store, notes are lost on restart");
                Ok(Arc::new(MemoryNoteStore::new()))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_memory_backend() {
        let config = Config {
            store_backend: StoreBackend::Memory,
            ..Default::default()
        };

        let store = NoteStoreFactory::from_config(&config).await.unwrap();
        assert!(store.list_by_message_id("m1").await.unwrap().is_empty());
    }
}
