//! Testimonial Routers

use axum::{
    Router,
    routing::{get, patch},
};
use store::DocumentStore;

use crate::presentation::handlers::{self, TestimonialsAppState};

/// `GET /` approved list, `POST /` submission
pub fn testimonials_public_router<S>(state: TestimonialsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_approved::<S>).post(handlers::submit_testimonial::<S>),
        )
        .with_state(state)
}

/// Moderation; expects `Extension<Actor>` from the caller's guard
pub fn testimonials_admin_router<S>(state: TestimonialsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/moderation", get(handlers::list_for_moderation::<S>))
        .route("/{id}/status", patch(handlers::change_status::<S>))
        .with_state(state)
}
