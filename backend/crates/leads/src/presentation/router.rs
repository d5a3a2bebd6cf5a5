//! Lead Routers
//!
//! Both routers are nested under `/api/leads`; the caller guards the admin
//! one so its handlers can read `Extension<Actor>`.

use axum::{
    Router,
    routing::{get, patch, post},
};
use store::DocumentStore;

use crate::presentation::handlers::{self, LeadsAppState};

/// `POST /` - public submission
pub fn leads_public_router<S>(state: LeadsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(handlers::submit_lead::<S>))
        .with_state(state)
}

/// Admin workflow
pub fn leads_admin_router<S>(state: LeadsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_leads::<S>))
        .route(
            "/{id}",
            get(handlers::get_lead::<S>)
                .patch(handlers::update_lead::<S>)
                .delete(handlers::delete_lead::<S>),
        )
        .route("/{id}/status", patch(handlers::change_status::<S>))
        .route("/{id}/assign", patch(handlers::assign_lead::<S>))
        .route("/{id}/unassign", patch(handlers::unassign_lead::<S>))
        .with_state(state)
}
