//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::actor::Actor;
use kernel::id::LeadId;
use platform::client::ClientInfo;
use platform::rate_limit::SubmissionThrottle;
use store::DocumentStore;

use crate::application::config::LeadsConfig;
use crate::application::{ManageLeadsUseCase, SubmitLeadUseCase};
use crate::domain::Lead;
use crate::error::{LeadError, LeadResult};
use crate::presentation::dto::{
    AssignRequest, CreateLeadRequest, MessageResponse, StatusRequest, SubmitLeadResponse,
    UpdateLeadRequest,
};

/// Shared state for lead handlers
pub struct LeadsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub throttle: Arc<SubmissionThrottle>,
    pub config: Arc<LeadsConfig>,
}

impl<S> LeadsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    /// State with a throttle built from `config`
    pub fn new(store: Arc<S>, config: LeadsConfig) -> Self {
        Self {
            store,
            throttle: Arc::new(SubmissionThrottle::new(config.throttle.clone())),
            config: Arc::new(config),
        }
    }
}

impl<S> Clone for LeadsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            throttle: self.throttle.clone(),
            config: self.config.clone(),
        }
    }
}

fn parse_lead_id(raw: &str) -> LeadResult<LeadId> {
    raw.parse().map_err(|_| LeadError::NotFound)
}

// ============================================================================
// Public
// ============================================================================

/// POST /api/leads
pub async fn submit_lead<S>(
    State(state): State<LeadsAppState<S>>,
    client: ClientInfo,
    Json(req): Json<CreateLeadRequest>,
) -> LeadResult<(StatusCode, Json<SubmitLeadResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let form = req.into_form()?;
    let lead = SubmitLeadUseCase::new(
        state.store.clone(),
        state.throttle.clone(),
        state.config.clone(),
    )
    .execute(form, client.ip)
    .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitLeadResponse {
            reference_id: lead.id,
            status: lead.status,
        }),
    ))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /api/leads
pub async fn list_leads<S>(State(state): State<LeadsAppState<S>>) -> LeadResult<Json<Vec<Lead>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let leads = ManageLeadsUseCase::new(state.store.clone()).list().await?;
    Ok(Json(leads))
}

/// GET /api/leads/{id}
pub async fn get_lead<S>(
    State(state): State<LeadsAppState<S>>,
    Path(id): Path<String>,
) -> LeadResult<Json<Lead>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    let lead = ManageLeadsUseCase::new(state.store.clone()).get(&id).await?;
    Ok(Json(lead))
}

/// PATCH /api/leads/{id}/status
pub async fn change_status<S>(
    State(state): State<LeadsAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> LeadResult<Json<Lead>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    let lead = ManageLeadsUseCase::new(state.store.clone())
        .change_status(&actor, &id, req.status, &client)
        .await?;
    Ok(Json(lead))
}

/// PATCH /api/leads/{id}/assign
pub async fn assign_lead<S>(
    State(state): State<LeadsAppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<AssignRequest>,
) -> LeadResult<Json<Lead>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    let lead = ManageLeadsUseCase::new(state.store.clone())
        .assign(&id, req.admin_id)
        .await?;
    Ok(Json(lead))
}

/// PATCH /api/leads/{id}/unassign
pub async fn unassign_lead<S>(
    State(state): State<LeadsAppState<S>>,
    Path(id): Path<String>,
) -> LeadResult<Json<Lead>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    let lead = ManageLeadsUseCase::new(state.store.clone()).unassign(&id).await?;
    Ok(Json(lead))
}

/// PATCH /api/leads/{id}
pub async fn update_lead<S>(
    State(state): State<LeadsAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Path(id): Path<String>,
    Json(req): Json<UpdateLeadRequest>,
) -> LeadResult<Json<Lead>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    let patch = req.into_patch()?;
    let lead = ManageLeadsUseCase::new(state.store.clone())
        .update(&actor, &id, patch, &client)
        .await?;
    Ok(Json(lead))
}

/// DELETE /api/leads/{id}
pub async fn delete_lead<S>(
    State(state): State<LeadsAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Path(id): Path<String>,
) -> LeadResult<Json<MessageResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_lead_id(&id)?;
    ManageLeadsUseCase::new(state.store.clone())
        .delete(&actor, &id, &client)
        .await?;
    Ok(Json(MessageResponse {
        message: "Lead deleted successfully",
    }))
}
