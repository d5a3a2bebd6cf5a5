//! Audit Log Entity

use chrono::{DateTime, Utc};
use kernel::actor::Actor;
use kernel::id::AuditLogId;
use platform::client::ClientInfo;
use serde::{Deserialize, Serialize};
use store::Record;

/// Resource type names used on audit entries
pub mod resource {
    pub const LEAD: &str = "lead";
    pub const TESTIMONIAL: &str = "testimonial";
    pub const USER: &str = "user";
    pub const AUTH: &str = "auth";
}

/// Audited staff action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    // Leads
    LeadStatusChanged,
    LeadViewed,
    LeadUpdated,
    LeadDeleted,
    // Testimonials
    TestimonialApproved,
    TestimonialRejected,
    // Users
    UserCreated,
    UserDeleted,
    PasswordChanged,
    // Sign-in
    LoginSuccess,
    LoginFailed,
    Logout,
}

/// Persisted audit entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    pub id: AuditLogId,
    pub action: AuditAction,
    pub user_id: String,
    pub username: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Record for AuditLog {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

/// An entry about to be recorded
///
/// ## Examples
/// ```rust
/// use audit::{AuditAction, AuditEntry, resource};
/// use kernel::actor::{Actor, StaffRole};
///
/// let actor = Actor::new("u1", "alice", StaffRole::Admin);
/// let entry = AuditEntry::by(&actor, AuditAction::LeadDeleted, resource::LEAD)
///     .resource_id("lead-1")
///     .details(serde_json::json!({ "leadName": "Ahmad" }));
/// assert_eq!(entry.username, "alice");
/// ```
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub action: AuditAction,
    pub user_id: String,
    pub username: String,
    pub resource_type: String,
    pub resource_id: Option<String>,
    pub details: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl AuditEntry {
    pub fn new(
        action: AuditAction,
        user_id: impl Into<String>,
        username: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            action,
            user_id: user_id.into(),
            username: username.into(),
            resource_type: resource_type.into(),
            resource_id: None,
            details: serde_json::Value::Object(Default::default()),
            ip_address: None,
            user_agent: None,
        }
    }

    /// Entry performed by an authenticated staff member
    pub fn by(actor: &Actor, action: AuditAction, resource_type: impl Into<String>) -> Self {
        Self::new(action, &actor.user_id, &actor.username, resource_type)
    }

    pub fn resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    pub fn details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn client(mut self, client: &ClientInfo) -> Self {
        self.ip_address = client.ip_string();
        self.user_agent = client.user_agent.clone();
        self
    }

    pub(crate) fn into_log(self, now: DateTime<Utc>) -> AuditLog {
        AuditLog {
            id: AuditLogId::new(),
            action: self.action,
            user_id: self.user_id,
            username: self.username,
            resource_type: self.resource_type,
            resource_id: self.resource_id,
            details: self.details,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: now,
        }
    }
}
