//! Manage Leads Use Case
//!
//! Staff workflow over submitted leads. Status changes, edits and deletes
//! are written to the audit trail.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, RecordAuditUseCase, resource};
use chrono::Utc;
use kernel::actor::Actor;
use kernel::id::LeadId;
use platform::client::ClientInfo;
use serde_json::json;
use store::{DocumentStore, collections};

use crate::domain::{ApplicationStatus, Lead, LeadPatch};
use crate::error::{LeadError, LeadResult};

pub struct ManageLeadsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
    audit: RecordAuditUseCase<S>,
}

impl<S> ManageLeadsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            audit: RecordAuditUseCase::new(store.clone()),
            store,
        }
    }

    /// Every lead, newest first
    pub async fn list(&self) -> LeadResult<Vec<Lead>> {
        let mut leads: Vec<Lead> = self.store.find_all(collections::LEADS).await?;
        leads.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(leads)
    }

    pub async fn get(&self, id: &LeadId) -> LeadResult<Lead> {
        let id = *id;
        self.store
            .find_one(collections::LEADS, move |lead: &Lead| lead.id == id)
            .await?
            .ok_or(LeadError::NotFound)
    }

    pub async fn change_status(
        &self,
        actor: &Actor,
        id: &LeadId,
        status: ApplicationStatus,
        client: &ClientInfo,
    ) -> LeadResult<Lead> {
        let before = self.get(id).await?;
        let lead = self.modify(id, move |lead| lead.with_status(status, Utc::now())).await?;

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::LeadStatusChanged, resource::LEAD)
                    .resource_id(id.to_string())
                    .details(json!({
                        "oldStatus": before.status,
                        "newStatus": status,
                        "leadName": lead.full_name,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(lead_id = %id, old_status = %before.status, new_status = %status, "Lead status changed");
        Ok(lead)
    }

    pub async fn assign(&self, id: &LeadId, admin_id: String) -> LeadResult<Lead> {
        let lead = self
            .modify(id, move |lead| lead.with_assignee(Some(admin_id), Utc::now()))
            .await?;
        tracing::info!(lead_id = %id, assigned_to = lead.assigned_to.as_deref().unwrap_or("-"), "Lead assigned");
        Ok(lead)
    }

    pub async fn unassign(&self, id: &LeadId) -> LeadResult<Lead> {
        let lead = self
            .modify(id, |lead| lead.with_assignee(None, Utc::now()))
            .await?;
        tracing::info!(lead_id = %id, "Lead unassigned");
        Ok(lead)
    }

    pub async fn update(
        &self,
        actor: &Actor,
        id: &LeadId,
        patch: LeadPatch,
        client: &ClientInfo,
    ) -> LeadResult<Lead> {
        let patch = patch.validated()?;
        let updated_fields = patch.field_names();
        let lead = self.modify(id, move |lead| lead.patched(patch, Utc::now())).await?;

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::LeadUpdated, resource::LEAD)
                    .resource_id(id.to_string())
                    .details(json!({
                        "leadName": lead.full_name,
                        "updatedFields": updated_fields,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(lead_id = %id, fields = ?updated_fields, "Lead updated");
        Ok(lead)
    }

    pub async fn delete(&self, actor: &Actor, id: &LeadId, client: &ClientInfo) -> LeadResult<()> {
        let lead = self.get(id).await?;
        let target = *id;
        let removed = self
            .store
            .delete(collections::LEADS, move |lead: &Lead| lead.id == target)
            .await?;
        if !removed {
            return Err(LeadError::NotFound);
        }

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::LeadDeleted, resource::LEAD)
                    .resource_id(id.to_string())
                    .details(json!({
                        "leadName": lead.full_name,
                        "leadPhone": lead.phone,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(lead_id = %id, "Lead deleted");
        Ok(())
    }

    async fn modify<F>(&self, id: &LeadId, change: F) -> LeadResult<Lead>
    where
        F: FnOnce(Lead) -> Lead + Send,
    {
        let id = *id;
        self.store
            .update(collections::LEADS, move |lead: &Lead| lead.id == id, change)
            .await?
            .ok_or(LeadError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LeadForm, LoanType};
    use audit::QueryAuditLogsUseCase;
    use kernel::actor::StaffRole;
    use store::JsonFileStore;

    async fn setup() -> (tempfile::TempDir, Arc<JsonFileStore>, Lead) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let lead = store
            .create(collections::LEADS, Lead::submitted(LeadForm::sample(), Utc::now()))
            .await
            .unwrap();
        (dir, store, lead)
    }

    fn admin() -> Actor {
        Actor::new("admin-1", "siti", StaffRole::Admin)
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let (_dir, store, first) = setup().await;
        let later = Lead::submitted(LeadForm::sample(), first.created_at + chrono::Duration::seconds(5));
        store.create(collections::LEADS, later.clone()).await.unwrap();

        let leads = ManageLeadsUseCase::new(store).list().await.unwrap();
        assert_eq!(leads[0].id, later.id);
        assert_eq!(leads[1].id, first.id);
    }

    #[tokio::test]
    async fn test_status_change_is_audited() {
        let (_dir, store, lead) = setup().await;
        let use_case = ManageLeadsUseCase::new(store.clone());

        let updated = use_case
            .change_status(&admin(), &lead.id, ApplicationStatus::Contacted, &ClientInfo::default())
            .await
            .unwrap();
        assert_eq!(updated.status, ApplicationStatus::Contacted);

        let logs = QueryAuditLogsUseCase::new(store)
            .by_resource(&lead.id.to_string())
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, AuditAction::LeadStatusChanged);
        assert_eq!(logs[0].details["oldStatus"], "SUBMITTED");
        assert_eq!(logs[0].details["newStatus"], "CONTACTED");
        assert_eq!(logs[0].details["leadName"], "Ahmad bin Ali");
        assert_eq!(logs[0].username, "siti");
    }

    #[tokio::test]
    async fn test_assign_and_unassign() {
        let (_dir, store, lead) = setup().await;
        let use_case = ManageLeadsUseCase::new(store);

        let assigned = use_case.assign(&lead.id, "admin-2".into()).await.unwrap();
        assert_eq!(assigned.assigned_to.as_deref(), Some("admin-2"));

        let unassigned = use_case.unassign(&lead.id).await.unwrap();
        assert!(unassigned.assigned_to.is_none());
    }

    #[tokio::test]
    async fn test_update_records_changed_fields() {
        let (_dir, store, lead) = setup().await;
        let use_case = ManageLeadsUseCase::new(store.clone());

        let patch = LeadPatch {
            loan_type: Some(LoanType::Business),
            message: Some("Call after 5pm".into()),
            ..Default::default()
        };
        let updated = use_case
            .update(&admin(), &lead.id, patch, &ClientInfo::default())
            .await
            .unwrap();
        assert_eq!(updated.loan_type, LoanType::Business);

        let logs = QueryAuditLogsUseCase::new(store)
            .by_resource(&lead.id.to_string())
            .await
            .unwrap();
        assert_eq!(
            logs[0].details["updatedFields"],
            serde_json::json!(["loanType", "message"])
        );
    }

    #[tokio::test]
    async fn test_missing_lead() {
        let (_dir, store, _lead) = setup().await;
        let use_case = ManageLeadsUseCase::new(store.clone());
        let missing = LeadId::new();

        assert!(matches!(use_case.get(&missing).await, Err(LeadError::NotFound)));
        assert!(matches!(use_case.unassign(&missing).await, Err(LeadError::NotFound)));
        assert!(matches!(
            use_case
                .change_status(&admin(), &missing, ApplicationStatus::Approved, &ClientInfo::default())
                .await,
            Err(LeadError::NotFound)
        ));

        let logs = QueryAuditLogsUseCase::new(store)
            .execute(&audit::AuditFilter::default())
            .await
            .unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (_dir, store, lead) = setup().await;
        let use_case = ManageLeadsUseCase::new(store.clone());

        use_case.delete(&admin(), &lead.id, &ClientInfo::default()).await.unwrap();
        assert!(use_case.list().await.unwrap().is_empty());
        assert!(matches!(
            use_case.delete(&admin(), &lead.id, &ClientInfo::default()).await,
            Err(LeadError::NotFound)
        ));

        let logs = QueryAuditLogsUseCase::new(store)
            .by_resource(&lead.id.to_string())
            .await
            .unwrap();
        assert_eq!(logs[0].action, AuditAction::LeadDeleted);
        assert_eq!(logs[0].details["leadPhone"], "012-3456789");
    }
}
