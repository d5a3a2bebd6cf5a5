//! Backend selection
//!
//! The active backend is chosen once at start-up and never switched.

use crate::config::StoreConfig;
use crate::document::PgDocumentStore;
use crate::error::StoreResult;
use crate::json_file::JsonFileStore;
use crate::record::{DocumentStore, Record};

/// The process-wide store, one of the two backends
pub enum StoreBackend {
    Json(JsonFileStore),
    Document(PgDocumentStore),
}

impl StoreBackend {
    /// Open the backend `config` selects
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        match &config.database_url {
            Some(url) => {
                tracing::info!("Using document store backend");
                let store = PgDocumentStore::connect(url, config.max_connections).await?;
                Ok(StoreBackend::Document(store))
            }
            None => {
                tracing::info!(data_dir = %config.data_dir.display(), "Using JSON file store backend");
                let store = JsonFileStore::open(&config.data_dir).await?;
                Ok(StoreBackend::Json(store))
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Json(_) => "json",
            StoreBackend::Document(_) => "document",
        }
    }
}

impl DocumentStore for StoreBackend {
    async fn find_all<T: Record>(&self, collection: &str) -> StoreResult<Vec<T>> {
        match self {
            StoreBackend::Json(s) => s.find_all(collection).await,
            StoreBackend::Document(s) => s.find_all(collection).await,
        }
    }

    async fn find_one<T, P>(&self, collection: &str, predicate: P) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        match self {
            StoreBackend::Json(s) => s.find_one(collection, predicate).await,
            StoreBackend::Document(s) => s.find_one(collection, predicate).await,
        }
    }

    async fn create<T: Record>(&self, collection: &str, record: T) -> StoreResult<T> {
        match self {
            StoreBackend::Json(s) => s.create(collection, record).await,
            StoreBackend::Document(s) => s.create(collection, record).await,
        }
    }

    async fn update<T, P, F>(
        &self,
        collection: &str,
        predicate: P,
        update_fn: F,
    ) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
        F: FnOnce(T) -> T + Send,
    {
        match self {
            StoreBackend::Json(s) => s.update(collection, predicate, update_fn).await,
            StoreBackend::Document(s) => s.update(collection, predicate, update_fn).await,
        }
    }

    async fn delete<T, P>(&self, collection: &str, predicate: P) -> StoreResult<bool>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        match self {
            StoreBackend::Json(s) => s.delete(collection, predicate).await,
            StoreBackend::Document(s) => s.delete(collection, predicate).await,
        }
    }
}
