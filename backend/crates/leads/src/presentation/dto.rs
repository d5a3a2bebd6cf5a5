//! API DTOs (Data Transfer Objects)

use kernel::id::LeadId;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationStatus, LeadForm, LeadPatch, LoanType};
use crate::error::{LeadError, LeadResult};

/// `POST /api/leads` body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: String,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub loan_amount: f64,
    pub loan_type: String,
    pub location: Option<String>,
    pub message: Option<String>,
}

fn parse_loan_type(raw: &str) -> LeadResult<LoanType> {
    LoanType::from_code(raw.trim())
        .ok_or_else(|| LeadError::Validation("loanType must be a valid enum value".to_string()))
}

impl CreateLeadRequest {
    pub fn into_form(self) -> LeadResult<LeadForm> {
        Ok(LeadForm {
            loan_type: parse_loan_type(&self.loan_type)?,
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            occupation: self.occupation,
            monthly_income: self.monthly_income,
            loan_amount: self.loan_amount,
            location: self.location,
            message: self.message,
        })
    }
}

/// `202 Accepted` body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLeadResponse {
    pub reference_id: LeadId,
    pub status: ApplicationStatus,
}

/// `PATCH /api/leads/{id}` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub loan_type: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl UpdateLeadRequest {
    pub fn into_patch(self) -> LeadResult<LeadPatch> {
        Ok(LeadPatch {
            loan_type: self.loan_type.as_deref().map(parse_loan_type).transpose()?,
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            occupation: self.occupation,
            monthly_income: self.monthly_income,
            loan_amount: self.loan_amount,
            location: self.location,
            message: self.message,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub admin_id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_from_json() {
        let req: CreateLeadRequest = serde_json::from_str(
            r#"{"fullName":"Ahmad","phone":"012-3456789","loanAmount":5000,"loanType":"HOUSING"}"#,
        )
        .unwrap();
        let form = req.into_form().unwrap();
        assert_eq!(form.loan_type, LoanType::Housing);
        assert_eq!(form.loan_amount, 5000.0);
    }

    #[test]
    fn test_unknown_loan_type_is_validation_error() {
        let req: CreateLeadRequest = serde_json::from_str(
            r#"{"fullName":"Ahmad","phone":"012-3456789","loanAmount":5000,"loanType":"YACHT"}"#,
        )
        .unwrap();
        let err = req.into_form().unwrap_err();
        assert_eq!(err.error_key(), "validation_error");
    }
}
