//! Record and store traits

use serde::{Serialize, de::DeserializeOwned};

use crate::error::StoreResult;

/// Collection names shared by the feature crates
pub mod collections {
    pub const LEADS: &str = "leads";
    pub const TESTIMONIALS: &str = "testimonials";
    pub const USERS: &str = "users";
    pub const AUDIT_LOGS: &str = "audit_logs";
    pub const PAGE_VIEWS: &str = "page_views";
}

/// A persisted record
///
/// Records are opaque to the store apart from their id, which must be
/// unique within a collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    fn record_id(&self) -> String;
}

/// Backend-agnostic persistence facade
///
/// Reads that fail return [`StoreError::Unavailable`](crate::StoreError::Unavailable),
/// never an empty result. Callers that prefer to fail open use
/// [`StoreResultExt::or_empty`](crate::StoreResultExt::or_empty).
#[trait_variant::make(DocumentStore: Send)]
pub trait LocalDocumentStore {
    /// Every record of a collection, in insertion order
    async fn find_all<T: Record>(&self, collection: &str) -> StoreResult<Vec<T>>;

    /// First record matching `predicate`
    async fn find_one<T, P>(&self, collection: &str, predicate: P) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync;

    /// Append a record; duplicate checks are the caller's policy
    async fn create<T: Record>(&self, collection: &str, record: T) -> StoreResult<T>;

    /// Transform the first match; `None` when nothing matched
    async fn update<T, P, F>(
        &self,
        collection: &str,
        predicate: P,
        update_fn: F,
    ) -> StoreResult<Option<T>>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync,
        F: FnOnce(T) -> T + Send;

    /// Remove every match; whether anything was removed
    async fn delete<T, P>(&self, collection: &str, predicate: P) -> StoreResult<bool>
    where
        T: Record,
        P: Fn(&T) -> bool + Send + Sync;
}

/// Collection names become file names, so keep them to `[a-z0-9_-]`
pub(crate) fn validate_collection(collection: &str) -> StoreResult<()> {
    let valid = !collection.is_empty()
        && collection
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(crate::StoreError::InvalidCollection(collection.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names() {
        assert!(validate_collection(collections::LEADS).is_ok());
        assert!(validate_collection(collections::AUDIT_LOGS).is_ok());
        assert!(validate_collection("").is_err());
        assert!(validate_collection("../etc/passwd").is_err());
        assert!(validate_collection("Leads").is_err());
    }
}
