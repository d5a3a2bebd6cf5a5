//! Lead form validation
//!
//! Free text is trimmed and HTML-escaped before length checks, so the
//! limits apply to what is stored.

use platform::sanitize::{
    is_valid_email, is_valid_malaysian_phone, sanitize_optional, sanitize_text,
};

use super::entity::LoanType;

pub const FULL_NAME_MAX: usize = 100;
pub const OCCUPATION_MAX: usize = 100;
pub const LOCATION_MAX: usize = 200;
pub const MESSAGE_MAX: usize = 1000;
pub const MONTHLY_INCOME_RANGE: (f64, f64) = (1_000.0, 1_000_000.0);
pub const LOAN_AMOUNT_RANGE: (f64, f64) = (1_000.0, 500_000.0);

/// Validation failures, one message per offending field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormErrors(pub Vec<String>);

impl FormErrors {
    pub fn message(&self) -> String {
        self.0.join("; ")
    }
}

#[derive(Default)]
struct Checks(Vec<String>);

impl Checks {
    fn max_len(&mut self, field: &str, value: Option<&str>, max: usize) {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.0.push(format!(
                "{field} must be shorter than or equal to {max} characters"
            ));
        }
    }

    fn range(&mut self, field: &str, value: Option<f64>, (min, max): (f64, f64)) {
        if let Some(v) = value {
            if !v.is_finite() || v < min || v > max {
                self.0.push(format!("{field} must be between {min} and {max}"));
            }
        }
    }

    fn phone(&mut self, value: Option<&str>) {
        if value.is_some_and(|v| !is_valid_malaysian_phone(v)) {
            self.0.push(
                "Phone number must be a valid Malaysian phone number (e.g., 012-3456789 or +6012-3456789)"
                    .to_string(),
            );
        }
    }

    fn email(&mut self, value: Option<&str>) {
        if value.is_some_and(|v| !is_valid_email(v)) {
            self.0.push("email must be an email".to_string());
        }
    }

    fn finish(self) -> Result<(), FormErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(FormErrors(self.0))
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A public loan application
#[derive(Debug, Clone, PartialEq)]
pub struct LeadForm {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub loan_amount: f64,
    pub loan_type: LoanType,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl LeadForm {
    /// Sanitize free text and check every field
    pub fn validated(self) -> Result<Self, FormErrors> {
        let form = Self {
            full_name: sanitize_text(&self.full_name),
            phone: self.phone.trim().to_string(),
            email: trimmed(self.email),
            occupation: sanitize_optional(self.occupation.as_deref()),
            monthly_income: self.monthly_income,
            loan_amount: self.loan_amount,
            loan_type: self.loan_type,
            location: sanitize_optional(self.location.as_deref()),
            message: sanitize_optional(self.message.as_deref()),
        };

        let mut checks = Checks::default();
        if form.full_name.is_empty() {
            checks.0.push("fullName should not be empty".to_string());
        }
        checks.max_len("fullName", Some(&form.full_name), FULL_NAME_MAX);
        checks.phone(Some(&form.phone));
        checks.email(form.email.as_deref());
        checks.max_len("occupation", form.occupation.as_deref(), OCCUPATION_MAX);
        checks.range("monthlyIncome", form.monthly_income, MONTHLY_INCOME_RANGE);
        checks.range("loanAmount", Some(form.loan_amount), LOAN_AMOUNT_RANGE);
        checks.max_len("location", form.location.as_deref(), LOCATION_MAX);
        checks.max_len("message", form.message.as_deref(), MESSAGE_MAX);
        checks.finish()?;

        Ok(form)
    }
}

/// Partial admin edit of a lead; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub occupation: Option<String>,
    pub monthly_income: Option<f64>,
    pub loan_amount: Option<f64>,
    pub loan_type: Option<LoanType>,
    pub location: Option<String>,
    pub message: Option<String>,
}

impl LeadPatch {
    /// Same rules as [`LeadForm::validated`], applied to present fields
    pub fn validated(self) -> Result<Self, FormErrors> {
        let patch = Self {
            full_name: sanitize_optional(self.full_name.as_deref()),
            phone: trimmed(self.phone),
            email: trimmed(self.email),
            occupation: sanitize_optional(self.occupation.as_deref()),
            monthly_income: self.monthly_income,
            loan_amount: self.loan_amount,
            loan_type: self.loan_type,
            location: sanitize_optional(self.location.as_deref()),
            message: sanitize_optional(self.message.as_deref()),
        };

        let mut checks = Checks::default();
        checks.max_len("fullName", patch.full_name.as_deref(), FULL_NAME_MAX);
        checks.phone(patch.phone.as_deref());
        checks.email(patch.email.as_deref());
        checks.max_len("occupation", patch.occupation.as_deref(), OCCUPATION_MAX);
        checks.range("monthlyIncome", patch.monthly_income, MONTHLY_INCOME_RANGE);
        checks.range("loanAmount", patch.loan_amount, LOAN_AMOUNT_RANGE);
        checks.max_len("location", patch.location.as_deref(), LOCATION_MAX);
        checks.max_len("message", patch.message.as_deref(), MESSAGE_MAX);
        checks.finish()?;

        Ok(patch)
    }

    /// Wire names of the fields this patch sets
    pub fn field_names(&self) -> Vec<&'static str> {
        [
            ("fullName", self.full_name.is_some()),
            ("phone", self.phone.is_some()),
            ("email", self.email.is_some()),
            ("occupation", self.occupation.is_some()),
            ("monthlyIncome", self.monthly_income.is_some()),
            ("loanAmount", self.loan_amount.is_some()),
            ("loanType", self.loan_type.is_some()),
            ("location", self.location.is_some()),
            ("message", self.message.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }
}

#[cfg(test)]
impl LeadForm {
    pub(crate) fn sample() -> Self {
        Self {
            full_name: "Ahmad bin Ali".into(),
            phone: "012-3456789".into(),
            email: None,
            occupation: None,
            monthly_income: None,
            loan_amount: 10_000.0,
            loan_type: LoanType::Personal,
            location: None,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        assert_eq!(LeadForm::sample().validated().unwrap(), LeadForm::sample());
    }

    #[test]
    fn test_free_text_is_sanitized() {
        let form = LeadForm {
            full_name: "  <b>Ahmad</b>  ".into(),
            message: Some("   ".into()),
            location: Some(" Kuala Lumpur ".into()),
            ..LeadForm::sample()
        }
        .validated()
        .unwrap();

        assert_eq!(form.full_name, "&lt;b&gt;Ahmad&lt;&#x2F;b&gt;");
        assert_eq!(form.message, None);
        assert_eq!(form.location.as_deref(), Some("Kuala Lumpur"));
    }

    #[test]
    fn test_every_bad_field_is_reported() {
        let errors = LeadForm {
            full_name: "   ".into(),
            phone: "12345".into(),
            email: Some("nope".into()),
            loan_amount: 999.0,
            monthly_income: Some(2_000_000.0),
            ..LeadForm::sample()
        }
        .validated()
        .unwrap_err();

        assert_eq!(errors.0.len(), 5);
        assert!(errors.message().contains("Malaysian"));
    }

    #[test]
    fn test_amount_bounds_are_inclusive() {
        for amount in [1_000.0, 500_000.0] {
            let form = LeadForm {
                loan_amount: amount,
                ..LeadForm::sample()
            };
            assert!(form.validated().is_ok(), "{amount}");
        }
        let form = LeadForm {
            loan_amount: f64::NAN,
            ..LeadForm::sample()
        };
        assert!(form.validated().is_err());
    }

    #[test]
    fn test_length_limits() {
        let form = LeadForm {
            full_name: "a".repeat(101),
            ..LeadForm::sample()
        };
        assert!(form.validated().is_err());

        // Escaping counts toward the limit
        let form = LeadForm {
            full_name: "&".repeat(25),
            ..LeadForm::sample()
        };
        assert!(form.validated().is_err());
    }

    #[test]
    fn test_patch_validation_and_fields() {
        let patch = LeadPatch {
            phone: Some(" 019-8765432 ".into()),
            loan_type: Some(LoanType::Vehicle),
            ..Default::default()
        }
        .validated()
        .unwrap();

        assert_eq!(patch.phone.as_deref(), Some("019-8765432"));
        assert_eq!(patch.field_names(), vec!["phone", "loanType"]);

        let bad = LeadPatch {
            loan_amount: Some(600_000.0),
            ..Default::default()
        };
        assert!(bad.validated().is_err());
        assert!(LeadPatch::default().is_empty());
    }
}
