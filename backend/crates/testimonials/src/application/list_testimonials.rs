//! List Testimonials Use Case

use std::sync::Arc;

use store::{DocumentStore, StoreResultExt, collections};

use crate::domain::Testimonial;
use crate::error::TestimonialResult;

pub struct ListTestimonialsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> ListTestimonialsUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Approved testimonials, newest first. An unreadable collection is
    /// served as empty so the public site keeps rendering.
    pub async fn approved(&self) -> TestimonialResult<Vec<Testimonial>> {
        let all: Vec<Testimonial> = self
            .store
            .find_all(collections::TESTIMONIALS)
            .await
            .or_empty()?;
        let mut approved: Vec<Testimonial> = all.into_iter().filter(Testimonial::is_approved).collect();
        approved.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(approved)
    }

    /// Moderation queue: every testimonial, newest first
    pub async fn all(&self) -> TestimonialResult<Vec<Testimonial>> {
        let mut all: Vec<Testimonial> = self.store.find_all(collections::TESTIMONIALS).await?;
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }
}
