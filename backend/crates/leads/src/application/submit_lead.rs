//! Submit Lead Use Case
//!
//! Public intake: validate, throttle by phone then by IP, apply the
//! duplicate policy, persist.

use std::net::IpAddr;
use std::sync::Arc;

use chrono::Utc;
use platform::rate_limit::SubmissionThrottle;
use store::{DocumentStore, collections};

use crate::application::config::{DuplicatePolicy, LeadsConfig};
use crate::domain::{Lead, LeadForm};
use crate::error::{LeadError, LeadResult};

pub struct SubmitLeadUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
    throttle: Arc<SubmissionThrottle>,
    config: Arc<LeadsConfig>,
}

impl<S> SubmitLeadUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, throttle: Arc<SubmissionThrottle>, config: Arc<LeadsConfig>) -> Self {
        Self {
            store,
            throttle,
            config,
        }
    }

    /// Nothing is written when validation, either throttle key, or the
    /// duplicate policy rejects the submission
    pub async fn execute(&self, form: LeadForm, ip: Option<IpAddr>) -> LeadResult<Lead> {
        let form = form.validated()?;

        self.throttle.check_and_record(&format!("phone:{}", form.phone))?;
        if let Some(ip) = ip {
            self.throttle.check_and_record(&format!("ip:{ip}"))?;
        }

        if self.config.duplicate_policy == DuplicatePolicy::Reject {
            let candidate = form.clone();
            let existing: Option<Lead> = self
                .store
                .find_one(collections::LEADS, move |lead: &Lead| lead.is_duplicate_of(&candidate))
                .await?;
            if existing.is_some() {
                return Err(LeadError::Duplicate);
            }
        }

        let lead = self
            .store
            .create(collections::LEADS, Lead::submitted(form, Utc::now()))
            .await?;

        tracing::info!(lead_id = %lead.id, loan_type = lead.loan_type.code(), "Lead submitted");
        Ok(lead)
    }
}
