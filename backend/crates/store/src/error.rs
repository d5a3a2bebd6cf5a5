//! Store Error Types

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A read could not be served; distinct from an empty collection
    #[error("Collection `{collection}` is unavailable: {source}")]
    Unavailable {
        collection: String,
        #[source]
        source: BoxError,
    },

    /// Write-path file system failure
    #[error("I/O error on collection `{collection}`: {source}")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Write-path database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid collection name: {0}")]
    InvalidCollection(String),
}

impl StoreError {
    pub(crate) fn unavailable(
        collection: &str,
        source: impl Into<BoxError>,
    ) -> Self {
        StoreError::Unavailable {
            collection: collection.to_string(),
            source: source.into(),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Unavailable { .. } => ErrorKind::ServiceUnavailable,
            StoreError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self.kind() {
            ErrorKind::ServiceUnavailable => "storage_unavailable",
            _ => "server_error",
        }
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        tracing::error!(error = %self, "Store error");
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        if let StoreError::Database(e) = err {
            let app = AppError::from(e);
            let key = match app.kind() {
                ErrorKind::ServiceUnavailable => "storage_unavailable",
                _ => "server_error",
            };
            return app.with_error_key(key);
        }

        let message = match err.kind() {
            ErrorKind::ServiceUnavailable => "Storage is temporarily unavailable",
            _ => "Storage error",
        };
        AppError::new(err.kind(), message)
            .with_error_key(err.error_key())
            .with_source(err)
    }
}

/// Explicit fail-open for reads
pub trait StoreResultExt<T> {
    /// Treat an unavailable collection as empty, logging the outage
    fn or_empty(self) -> StoreResult<Vec<T>>;
}

impl<T> StoreResultExt<T> for StoreResult<Vec<T>> {
    fn or_empty(self) -> StoreResult<Vec<T>> {
        match self {
            Err(err) if err.is_unavailable() => {
                tracing::warn!(error = %err, "Serving empty collection while storage is unavailable");
                Ok(Vec::new())
            }
            other => other,
        }
    }
}
