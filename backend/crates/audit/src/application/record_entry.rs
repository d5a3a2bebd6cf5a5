//! Record Audit Entry Use Case

use std::sync::Arc;

use chrono::Utc;
use store::{DocumentStore, collections};

use crate::domain::{AuditEntry, AuditLog};
use crate::error::AuditResult;

/// Appends one entry to the audit trail
pub struct RecordAuditUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> RecordAuditUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, entry: AuditEntry) -> AuditResult<AuditLog> {
        let log = entry.into_log(Utc::now());
        let log = self.store.create(collections::AUDIT_LOGS, log).await?;

        tracing::info!(
            audit_id = %log.id,
            action = ?log.action,
            username = %log.username,
            resource_type = %log.resource_type,
            resource_id = log.resource_id.as_deref().unwrap_or("-"),
            "Audit entry recorded"
        );

        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditAction, resource};
    use store::JsonFileStore;

    #[tokio::test]
    async fn test_record_persists_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let use_case = RecordAuditUseCase::new(store.clone());

        let entry = AuditEntry::new(AuditAction::LoginSuccess, "u1", "alice", resource::AUTH);
        let log = use_case.execute(entry).await.unwrap();

        let all: Vec<AuditLog> = store.find_all(collections::AUDIT_LOGS).await.unwrap();
        assert_eq!(all, vec![log]);
    }
}
