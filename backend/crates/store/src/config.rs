//! Store configuration

use std::path::PathBuf;

/// Storage backend selection
///
/// A database URL selects the document store; without one the JSON file
/// store under `data_dir` is used.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            database_url: None,
            max_connections: 5,
        }
    }
}

impl StoreConfig {
    /// JSON files in `data_dir`
    pub fn json(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        self.database_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn uses_database(&self) -> bool {
        self.database_url.is_some()
    }
}
