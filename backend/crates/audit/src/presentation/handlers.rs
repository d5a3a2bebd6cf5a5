//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use store::DocumentStore;

use crate::application::QueryAuditLogsUseCase;
use crate::domain::AuditLog;
use crate::error::AuditResult;
use crate::presentation::dto::{AuditLogQuery, ResourceQuery};

/// Shared state for audit handlers
pub struct AuditAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> Clone for AuditAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// GET /api/audit-logs
pub async fn list_logs<S>(
    State(state): State<AuditAppState<S>>,
    Query(query): Query<AuditLogQuery>,
) -> AuditResult<Json<Vec<AuditLog>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let filter = query.into_filter()?;
    let logs = QueryAuditLogsUseCase::new(state.store.clone())
        .execute(&filter)
        .await?;
    Ok(Json(logs))
}

/// GET /api/audit-logs/resource?resourceId=
pub async fn logs_for_resource<S>(
    State(state): State<AuditAppState<S>>,
    Query(query): Query<ResourceQuery>,
) -> AuditResult<Json<Vec<AuditLog>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let logs = QueryAuditLogsUseCase::new(state.store.clone())
        .by_resource(&query.resource_id)
        .await?;
    Ok(Json(logs))
}
