//! Lead Entity

use std::fmt;

use chrono::{DateTime, Utc};
use kernel::id::LeadId;
use serde::{Deserialize, Serialize};
use store::Record;

use super::form::{LeadForm, LeadPatch};

/// Where a lead is in the sales workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Contacted,
    InProgress,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub const fn code(&self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "SUBMITTED",
            ApplicationStatus::Contacted => "CONTACTED",
            ApplicationStatus::InProgress => "IN_PROGRESS",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanType {
    Personal,
    Business,
    Housing,
    Vehicle,
    Education,
    Other,
}

impl LoanType {
    pub const ALL: [LoanType; 6] = [
        LoanType::Personal,
        LoanType::Business,
        LoanType::Housing,
        LoanType::Vehicle,
        LoanType::Education,
        LoanType::Other,
    ];

    pub const fn code(&self) -> &'static str {
        match self {
            LoanType::Personal => "PERSONAL",
            LoanType::Business => "BUSINESS",
            LoanType::Housing => "HOUSING",
            LoanType::Vehicle => "VEHICLE",
            LoanType::Education => "EDUCATION",
            LoanType::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

/// A loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub full_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<f64>,
    pub loan_amount: f64,
    pub loan_type: LoanType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    /// Staff user id, `null` when unassigned
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for Lead {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl Lead {
    /// A freshly submitted, unassigned lead from a validated form
    pub fn submitted(form: LeadForm, now: DateTime<Utc>) -> Self {
        Self {
            id: LeadId::new(),
            full_name: form.full_name,
            phone: form.phone,
            email: form.email,
            occupation: form.occupation,
            monthly_income: form.monthly_income,
            loan_amount: form.loan_amount,
            loan_type: form.loan_type,
            location: form.location,
            message: form.message,
            status: ApplicationStatus::Submitted,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_status(mut self, status: ApplicationStatus, now: DateTime<Utc>) -> Self {
        self.status = status;
        self.updated_at = now;
        self
    }

    pub fn with_assignee(mut self, assignee: Option<String>, now: DateTime<Utc>) -> Self {
        self.assigned_to = assignee;
        self.updated_at = now;
        self
    }

    /// Overwrite the fields present in `patch`
    pub fn patched(mut self, patch: LeadPatch, now: DateTime<Utc>) -> Self {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
        if let Some(v) = patch.occupation {
            self.occupation = Some(v);
        }
        if let Some(v) = patch.monthly_income {
            self.monthly_income = Some(v);
        }
        if let Some(v) = patch.loan_amount {
            self.loan_amount = v;
        }
        if let Some(v) = patch.loan_type {
            self.loan_type = v;
        }
        if let Some(v) = patch.location {
            self.location = Some(v);
        }
        if let Some(v) = patch.message {
            self.message = Some(v);
        }
        self.updated_at = now;
        self
    }

    /// Same phone, or same email when both have one
    pub fn is_duplicate_of(&self, form: &LeadForm) -> bool {
        self.phone == form.phone
            || matches!((&self.email, &form.email), (Some(a), Some(b)) if a.eq_ignore_ascii_case(b))
    }
}
