//! API DTOs (Data Transfer Objects)

use serde::Deserialize;

use crate::domain::filter::parse_date_bound;
use crate::domain::{AuditAction, AuditFilter};
use crate::error::{AuditError, AuditResult};

/// `GET /api/audit-logs` query string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    pub user_id: Option<String>,
    pub action: Option<AuditAction>,
    pub resource_type: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AuditLogQuery {
    pub fn into_filter(self) -> AuditResult<AuditFilter> {
        Ok(AuditFilter {
            user_id: self.user_id.filter(|v| !v.is_empty()),
            action: self.action,
            resource_type: self.resource_type.filter(|v| !v.is_empty()),
            start: parse_bound("startDate", self.start_date)?,
            end: parse_bound("endDate", self.end_date)?,
        })
    }
}

fn parse_bound(
    name: &str,
    value: Option<String>,
) -> AuditResult<Option<chrono::DateTime<chrono::Utc>>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date_bound(raw)
            .map(Some)
            .ok_or_else(|| AuditError::InvalidFilter(format!("{name} is not a valid date"))),
    }
}

/// `GET /api/audit-logs/resource` query string
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceQuery {
    pub resource_id: String,
}
