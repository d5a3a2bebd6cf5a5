//! JSON file backend
//!
//! `<data_dir>/<collection>.json` holds the whole collection as a
//! pretty-printed JSON array. Mutations rewrite the file through a
//! temporary file and a rename, serialized per collection.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{StoreError, StoreResult};
use crate::record::{DocumentStore, Record, validate_collection};

/// File-backed document store
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
    write_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl JsonFileStore {
    /// Open (and create if needed) the data directory
    pub async fn open(data_dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let data_dir = data_dir.into();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|source| StoreError::Io {
                collection: data_dir.display().to_string(),
                source,
            })?;

        tracing::info!(data_dir = %data_dir.display(), "JSON file store ready");

        Ok(Self {
            data_dir,
            write_locks: Mutex::new(HashMap::new()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    fn write_lock(&self, collection: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.write_locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(collection.to_string()).or_default().clone()
    }

    /// Read a whole collection; a missing file is an empty collection
    async fn read_collection<T: Record>(&self, collection: &str) -> StoreResult<Vec<T>> {
        validate_collection(collection)?;
        let path = self.collection_path(collection);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::unavailable(collection, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| StoreError::unavailable(collection, e))
    }

    /// Replace a whole collection atomically
    async fn write_collection<T: Record>(&self, collection: &str, records: &[T]) -> StoreResult<()> {
        let path = self.collection_path(collection);
        let tmp_path = self.data_dir.join(format!(".{collection}.json.tmp"));
        let bytes = serde_json::to_vec_pretty(records)?;

        let io_err = |source| StoreError::Io {
            collection: collection.to_string(),
            source,
        };
        let written = match tokio::fs::write(&tmp_path, &bytes).await {
            Ok(()) => tokio::fs::rename(&tmp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            // No stale temp file may outlive a failed write
            if let Err(cleanup) = tokio::fs::remove_file(&tmp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(collection, error = %cleanup, "Failed to remove temp file");
                }
            }
            return Err(io_err(e));
        }

        tracing::debug!(collection, records = records.len(), "Collection written");
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    async fn find_all<T: Record>(&self, collection: &str) -> StoreResult<Vec<T>> {
        self.read_collection(collection).await
    }

    async fn find_one<T, P>(&self, collection: &str, predicate: P) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        let records: Vec<T> = self.read_collection(collection).await?;
        Ok(records.into_iter().find(|r| predicate(r)))
    }

    async fn create<T: Record>(&self, collection: &str, record: T) -> StoreResult<T> {
        validate_collection(collection)?;
        let lock = self.write_lock(collection);
        let _guard = lock.lock().await;

        let mut records: Vec<T> = self.read_collection(collection).await?;
        records.push(record.clone());
        self.write_collection(collection, &records).await?;

        Ok(record)
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
        validate_collection(collection)?;
        let lock = self.write_lock(collection);
        let _guard = lock.lock().await;

        let mut records: Vec<T> = self.read_collection(collection).await?;
        let Some(index) = records.iter().position(|r| predicate(r)) else {
            return Ok(None);
        };

        let updated = update_fn(records[index].clone());
        records[index] = updated.clone();
        self.write_collection(collection, &records).await?;

        Ok(Some(updated))
    }

    async fn delete<T, P>(&self, collection: &str, predicate: P) -> StoreResult<bool>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
    {
        validate_collection(collection)?;
        let lock = self.write_lock(collection);
        let _guard = lock.lock().await;

        let mut records: Vec<T> = self.read_collection(collection).await?;
        let before = records.len();
        records.retain(|r| !predicate(r));

        if records.len() == before {
            return Ok(false);
        }

        self.write_collection(collection, &records).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: String,
        owner: String,
        text: String,
    }

    impl Record for Note {
        fn record_id(&self) -> String {
            self.id.clone()
        }
    }

    fn note(id: &str, owner: &str) -> Note {
        Note {
            id: id.to_string(),
            owner: owner.to_string(),
            text: format!("note {id}"),
        }
    }

    async fn store() -> (tempfile::TempDir, JsonFileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_missing_collection_is_empty() {
        let (_dir, store) = store().await;
        let notes: Vec<Note> = store.find_all("notes").await.unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_find_one() {
        let (_dir, store) = store().await;
        let created = store.create("notes", note("n1", "alice")).await.unwrap();

        let found: Option<Note> = store
            .find_one("notes", |n: &Note| n.id == created.id)
            .await
            .unwrap();
        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let (_dir, store) = store().await;
        for id in ["a", "b", "c"] {
            store.create("notes", note(id, "alice")).await.unwrap();
        }

        let ids: Vec<String> = store
            .find_all::<Note>("notes")
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_update_first_match() {
        let (_dir, store) = store().await;
        store.create("notes", note("n1", "alice")).await.unwrap();
        store.create("notes", note("n2", "alice")).await.unwrap();

        let updated: Option<Note> = store
            .update(
                "notes",
                |n: &Note| n.owner == "alice",
                |mut n| {
                    n.text = "edited".to_string();
                    n
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.map(|n| n.id), Some("n1".to_string()));

        let all: Vec<Note> = store.find_all("notes").await.unwrap();
        assert_eq!(all[0].text, "edited");
        assert_eq!(all[1].text, "note n2");
    }

    #[tokio::test]
    async fn test_update_without_match_changes_nothing() {
        let (_dir, store) = store().await;
        store.create("notes", note("n1", "alice")).await.unwrap();
        let before: Vec<Note> = store.find_all("notes").await.unwrap();

        let updated: Option<Note> = store
            .update("notes", |n: &Note| n.id == "missing", |n| n)
            .await
            .unwrap();
        assert!(updated.is_none());

        let after: Vec<Note> = store.find_all("notes").await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_delete_removes_every_match() {
        let (_dir, store) = store().await;
        store.create("notes", note("n1", "alice")).await.unwrap();
        store.create("notes", note("n2", "bob")).await.unwrap();
        store.create("notes", note("n3", "alice")).await.unwrap();

        assert!(store.delete("notes", |n: &Note| n.owner == "alice").await.unwrap());
        let remaining: Vec<Note> = store.find_all("notes").await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, "n2");

        assert!(!store.delete("notes", |n: &Note| n.owner == "carol").await.unwrap());
        assert_eq!(store.find_all::<Note>("notes").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unavailable_not_empty() {
        let (dir, store) = store().await;
        std::fs::write(dir.path().join("notes.json"), b"{ not json").unwrap();

        let err = store.find_all::<Note>("notes").await.unwrap_err();
        assert!(err.is_unavailable());

        // A failed read must not be overwritten by a write
        assert!(store.create("notes", note("n1", "alice")).await.is_err());
        let raw = std::fs::read_to_string(dir.path().join("notes.json")).unwrap();
        assert_eq!(raw, "{ not json");
    }

    #[tokio::test]
    async fn test_concurrent_creates_are_not_lost() {
        let (_dir, store) = store().await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..20 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.create("notes", note(&format!("n{i}"), "alice")).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.find_all::<Note>("notes").await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_file_is_pretty_json_array() {
        let (dir, store) = store().await;
        store.create("notes", note("n1", "alice")).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("notes.json")).unwrap();
        assert!(raw.starts_with("[\n"));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], "n1");
    }

    #[tokio::test]
    async fn test_invalid_collection_name_rejected() {
        let (_dir, store) = store().await;
        assert!(matches!(
            store.create("../escape", note("n1", "alice")).await,
            Err(StoreError::InvalidCollection(_))
        ));
    }

    #[tokio::test]
    async fn test_failed_rename_leaves_no_temp_file() {
        let (dir, store) = store().await;
        // A non-empty directory where the collection file belongs makes the rename fail
        std::fs::create_dir(dir.path().join("notes.json")).unwrap();
        std::fs::write(dir.path().join("notes.json").join("keep"), b"x").unwrap();

        let err = store
            .write_collection("notes", &[note("n1", "alice")])
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert!(!dir.path().join(".notes.json.tmp").exists());
    }
}
