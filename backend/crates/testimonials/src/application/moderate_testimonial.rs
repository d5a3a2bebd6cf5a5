//! Moderate Testimonial Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, RecordAuditUseCase, resource};
use chrono::Utc;
use kernel::actor::Actor;
use kernel::id::TestimonialId;
use platform::client::ClientInfo;
use platform::sanitize::sanitize_optional;
use serde_json::json;
use store::{DocumentStore, collections};

use crate::domain::{Testimonial, TestimonialStatus};
use crate::error::{TestimonialError, TestimonialResult};

pub struct ModerateTestimonialUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
    audit: RecordAuditUseCase<S>,
}

impl<S> ModerateTestimonialUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            audit: RecordAuditUseCase::new(store.clone()),
            store,
        }
    }

    /// Record a decision by `actor`. Any status other than APPROVED is
    /// audited as a rejection.
    pub async fn change_status(
        &self,
        actor: &Actor,
        id: &TestimonialId,
        status: TestimonialStatus,
        reason: Option<String>,
        client: &ClientInfo,
    ) -> TestimonialResult<Testimonial> {
        let target = *id;
        let moderator_id = actor.user_id.clone();
        let reason = sanitize_optional(reason.as_deref());

        let testimonial = self
            .store
            .update(
                collections::TESTIMONIALS,
                move |t: &Testimonial| t.id == target,
                move |t| t.moderated(moderator_id, status, reason, Utc::now()),
            )
            .await?
            .ok_or(TestimonialError::NotFound)?;

        let action = match status {
            TestimonialStatus::Approved => AuditAction::TestimonialApproved,
            _ => AuditAction::TestimonialRejected,
        };
        self.audit
            .execute(
                AuditEntry::by(actor, action, resource::TESTIMONIAL)
                    .resource_id(id.to_string())
                    .details(json!({
                        "status": status,
                        "testimonialName": testimonial.name,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(testimonial_id = %id, status = ?status, moderator = %actor.username, "Testimonial moderated");
        Ok(testimonial)
    }
}
