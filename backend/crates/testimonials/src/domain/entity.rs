//! Testimonial Entity

use chrono::{DateTime, Utc};
use kernel::id::TestimonialId;
use serde::{Deserialize, Serialize};
use store::Record;

use super::form::TestimonialForm;

/// Moderator id recorded for the initial PENDING entry
pub const SYSTEM_MODERATOR: &str = "system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestimonialStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// One moderation decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeratorLogEntry {
    pub moderator_id: String,
    pub status: TestimonialStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub status: TestimonialStatus,
    #[serde(default)]
    pub moderator_log: Vec<ModeratorLogEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Testimonial {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Testimonial {
    /// A pending testimonial whose log starts with the system entry
    pub fn submitted(form: TestimonialForm, now: DateTime<Utc>) -> Self {
        Self {
            id: TestimonialId::new(),
            name: form.name,
            message: form.message,
            rating: form.rating,
            status: TestimonialStatus::Pending,
            moderator_log: vec![ModeratorLogEntry {
                moderator_id: SYSTEM_MODERATOR.to_string(),
                status: TestimonialStatus::Pending,
                reason: None,
                timestamp: now,
            }],
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the status and append the decision to the log
    pub fn moderated(
        mut self,
        moderator_id: String,
        status: TestimonialStatus,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        self.status = status;
        self.moderator_log.push(ModeratorLogEntry {
            moderator_id,
            status,
            reason,
            timestamp: now,
        });
        self.updated_at = now;
        self
    }

    pub fn is_approved(&self) -> bool {
        self.status == TestimonialStatus::Approved
    }
}
