//! Submit Testimonial Use Case

use std::sync::Arc;

use chrono::Utc;
use store::{DocumentStore, collections};

use crate::domain::{Testimonial, TestimonialForm};
use crate::error::{TestimonialError, TestimonialResult};

pub struct SubmitTestimonialUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> SubmitTestimonialUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, form: TestimonialForm) -> TestimonialResult<Testimonial> {
        let form = form
            .validated()
            .map_err(|errors| TestimonialError::Validation(errors.join("; ")))?;

        let testimonial = self
            .store
            .create(collections::TESTIMONIALS, Testimonial::submitted(form, Utc::now()))
            .await?;

        tracing::info!(testimonial_id = %testimonial.id, "Testimonial submitted");
        Ok(testimonial)
    }
}
