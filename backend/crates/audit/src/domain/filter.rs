//! Audit log filters

use chrono::{DateTime, NaiveDate, Utc};

use super::entity::{AuditAction, AuditLog};

/// Conjunctive filter over the audit trail; unset fields match everything
#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub user_id: Option<String>,
    pub action: Option<AuditAction>,
    pub resource_type: Option<String>,
    /// Inclusive lower bound on `created_at`
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`
    pub end: Option<DateTime<Utc>>,
}

impl AuditFilter {
    pub fn matches(&self, log: &AuditLog) -> bool {
        self.user_id.as_ref().is_none_or(|id| &log.user_id == id)
            && self.action.is_none_or(|action| log.action == action)
            && self
                .resource_type
                .as_ref()
                .is_none_or(|rt| &log.resource_type == rt)
            && self.start.is_none_or(|start| log.created_at >= start)
            && self.end.is_none_or(|end| log.created_at <= end)
    }
}

/// Parse a date filter: RFC 3339, or a bare `YYYY-MM-DD` meaning UTC midnight
pub fn parse_date_bound(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
