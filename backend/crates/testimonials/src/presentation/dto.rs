//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::TestimonialId;
use serde::{Deserialize, Serialize};

use crate::domain::{Testimonial, TestimonialForm, TestimonialStatus};

/// `POST /api/testimonials` body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestimonialRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    pub rating: Option<u8>,
}

impl From<CreateTestimonialRequest> for TestimonialForm {
    fn from(req: CreateTestimonialRequest) -> Self {
        Self {
            name: req.name,
            message: req.message,
            rating: req.rating,
        }
    }
}

/// `202 Accepted` body
#[derive(Debug, Serialize)]
pub struct SubmitTestimonialResponse {
    pub id: TestimonialId,
    pub status: TestimonialStatus,
}

/// Public view; the moderator log stays internal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTestimonial {
    pub id: TestimonialId,
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl From<Testimonial> for PublicTestimonial {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            name: t.name,
            message: t.message,
            rating: t.rating,
            created_at: t.created_at,
        }
    }
}

/// `PATCH /api/testimonials/{id}/status` body
#[derive(Debug, Clone, Deserialize)]
pub struct StatusRequest {
    pub status: TestimonialStatus,
    pub reason: Option<String>,
}
