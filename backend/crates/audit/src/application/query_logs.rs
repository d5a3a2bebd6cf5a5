//! Query Audit Logs Use Case

use std::sync::Arc;

use store::{DocumentStore, collections};

use crate::domain::{AuditFilter, AuditLog};
use crate::error::AuditResult;

/// Reads the audit trail, newest first
pub struct QueryAuditLogsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> QueryAuditLogsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Entries matching `filter`
    pub async fn execute(&self, filter: &AuditFilter) -> AuditResult<Vec<AuditLog>> {
        let logs: Vec<AuditLog> = self.store.find_all(collections::AUDIT_LOGS).await?;
        let mut logs: Vec<AuditLog> = logs.into_iter().filter(|log| filter.matches(log)).collect();
        sort_newest_first(&mut logs);
        Ok(logs)
    }

    /// Entries about one resource (a lead, a testimonial, a user)
    pub async fn by_resource(&self, resource_id: &str) -> AuditResult<Vec<AuditLog>> {
        let logs: Vec<AuditLog> = self.store.find_all(collections::AUDIT_LOGS).await?;
        let mut logs: Vec<AuditLog> = logs
            .into_iter()
            .filter(|log| log.resource_id.as_deref() == Some(resource_id))
            .collect();
        sort_newest_first(&mut logs);
        Ok(logs)
    }
}

fn sort_newest_first(logs: &mut [AuditLog]) {
    logs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RecordAuditUseCase;
    use crate::domain::{AuditAction, AuditEntry, resource};
    use store::JsonFileStore;

    async fn seeded() -> (tempfile::TempDir, Arc<JsonFileStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let record = RecordAuditUseCase::new(store.clone());

        let entries = [
            AuditEntry::new(AuditAction::LeadStatusChanged, "u1", "alice", resource::LEAD)
                .resource_id("lead-1"),
            AuditEntry::new(AuditAction::LeadDeleted, "u2", "bob", resource::LEAD)
                .resource_id("lead-2"),
            AuditEntry::new(AuditAction::LeadUpdated, "u1", "alice", resource::LEAD)
                .resource_id("lead-1"),
            AuditEntry::new(AuditAction::LoginSuccess, "u1", "alice", resource::AUTH),
        ];
        for entry in entries {
            record.execute(entry).await.unwrap();
        }
        (dir, store)
    }

    #[tokio::test]
    async fn test_query_newest_first() {
        let (_dir, store) = seeded().await;
        let logs = QueryAuditLogsUseCase::new(store)
            .execute(&AuditFilter::default())
            .await
            .unwrap();

        assert_eq!(logs.len(), 4);
        assert!(logs.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[tokio::test]
    async fn test_query_by_user_and_type() {
        let (_dir, store) = seeded().await;
        let filter = AuditFilter {
            user_id: Some("u1".into()),
            resource_type: Some(resource::LEAD.into()),
            ..Default::default()
        };
        let logs = QueryAuditLogsUseCase::new(store).execute(&filter).await.unwrap();

        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.user_id == "u1" && l.resource_type == "lead"));
    }

    #[tokio::test]
    async fn test_by_resource() {
        let (_dir, store) = seeded().await;
        let logs = QueryAuditLogsUseCase::new(store).by_resource("lead-1").await.unwrap();

        let actions: Vec<AuditAction> = logs.iter().map(|l| l.action).collect();
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&AuditAction::LeadStatusChanged));
        assert!(actions.contains(&AuditAction::LeadUpdated));
    }
}
