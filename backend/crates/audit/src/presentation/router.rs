//! Audit Routers
//!
//! The full trail and the per-resource view need different roles, so the
//! caller layers each router with its own guard.

use std::sync::Arc;

use axum::{Router, routing::get};
use store::DocumentStore;

use crate::presentation::handlers::{self, AuditAppState};

/// `GET /` - filtered trail (super admins)
pub fn audit_log_router<S>(store: Arc<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_logs::<S>))
        .with_state(AuditAppState { store })
}

/// `GET /resource` - entries about one resource (admins)
pub fn audit_resource_router<S>(store: Arc<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/resource", get(handlers::logs_for_resource::<S>))
        .with_state(AuditAppState { store })
}
