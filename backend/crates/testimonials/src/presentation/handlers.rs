//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::actor::Actor;
use kernel::id::TestimonialId;
use platform::client::ClientInfo;
use store::DocumentStore;

use crate::application::{
    ListTestimonialsUseCase, ModerateTestimonialUseCase, SubmitTestimonialUseCase,
};
use crate::domain::Testimonial;
use crate::error::{TestimonialError, TestimonialResult};
use crate::presentation::dto::{
    CreateTestimonialRequest, PublicTestimonial, StatusRequest, SubmitTestimonialResponse,
};

pub struct TestimonialsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
}

impl<S> TestimonialsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> Clone for TestimonialsAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

/// POST /api/testimonials
pub async fn submit_testimonial<S>(
    State(state): State<TestimonialsAppState<S>>,
    Json(req): Json<CreateTestimonialRequest>,
) -> TestimonialResult<(StatusCode, Json<SubmitTestimonialResponse>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let testimonial = SubmitTestimonialUseCase::new(state.store.clone())
        .execute(req.into())
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitTestimonialResponse {
            id: testimonial.id,
            status: testimonial.status,
        }),
    ))
}

/// GET /api/testimonials
pub async fn list_approved<S>(
    State(state): State<TestimonialsAppState<S>>,
) -> TestimonialResult<Json<Vec<PublicTestimonial>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let approved = ListTestimonialsUseCase::new(state.store.clone())
        .approved()
        .await?;
    Ok(Json(approved.into_iter().map(PublicTestimonial::from).collect()))
}

/// GET /api/testimonials/moderation
pub async fn list_for_moderation<S>(
    State(state): State<TestimonialsAppState<S>>,
) -> TestimonialResult<Json<Vec<Testimonial>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let all = ListTestimonialsUseCase::new(state.store.clone()).all().await?;
    Ok(Json(all))
}

/// PATCH /api/testimonials/{id}/status
pub async fn change_status<S>(
    State(state): State<TestimonialsAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Path(id): Path<String>,
    Json(req): Json<StatusRequest>,
) -> TestimonialResult<Json<Testimonial>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id: TestimonialId = id.parse().map_err(|_| TestimonialError::NotFound)?;
    let testimonial = ModerateTestimonialUseCase::new(state.store.clone())
        .change_status(&actor, &id, req.status, req.reason, &client)
        .await?;
    Ok(Json(testimonial))
}
