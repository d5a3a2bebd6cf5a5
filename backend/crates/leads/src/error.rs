//! Lead Error Types

use audit::AuditError;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::rate_limit::ThrottleExceeded;
use store::StoreError;
use thiserror::Error;

use crate::domain::FormErrors;

pub type LeadResult<T> = Result<T, LeadError>;

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("Lead not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Too many submissions, please try again later")]
    Throttled(#[from] ThrottleExceeded),

    /// Phone or email already on file under the reject policy
    #[error("A lead with this phone number or email already exists")]
    Duplicate,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl From<FormErrors> for LeadError {
    fn from(errors: FormErrors) -> Self {
        LeadError::Validation(errors.message())
    }
}

impl LeadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LeadError::NotFound => ErrorKind::NotFound,
            LeadError::Validation(_) => ErrorKind::BadRequest,
            LeadError::Throttled(_) => ErrorKind::TooManyRequests,
            LeadError::Duplicate => ErrorKind::Conflict,
            LeadError::Store(e) => e.kind(),
            LeadError::Audit(e) => e.kind(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            LeadError::NotFound => "lead_not_found",
            LeadError::Validation(_) => "validation_error",
            LeadError::Throttled(_) => "too_many_requests",
            LeadError::Duplicate => "duplicate_lead",
            LeadError::Store(e) => e.error_key(),
            LeadError::Audit(e) => e.error_key(),
        }
    }

    fn log(&self) {
        match self {
            LeadError::Store(e) => e.log(),
            LeadError::Audit(e) => tracing::error!(error = %e, "Audit write failed"),
            LeadError::Throttled(e) => {
                tracing::warn!(identifier = %e.identifier, retry_after_ms = e.retry_after_ms, "Lead submission throttled")
            }
            _ => tracing::debug!(error = %self, "Lead error"),
        }
    }
}

impl From<LeadError> for AppError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::Store(e) => e.into(),
            LeadError::Audit(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()).with_error_key(other.error_key()),
        }
    }
}

impl IntoResponse for LeadError {
    fn into_response(self) -> Response {
        self.log();
        let retry_after = match &self {
            LeadError::Throttled(e) => Some((e.retry_after_ms + 999) / 1000),
            _ => None,
        };

        let mut response = AppError::from(self).into_response();
        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle_maps_to_429() {
        let err = LeadError::from(ThrottleExceeded {
            identifier: "phone:012-3456789".into(),
            retry_after_ms: 1_500,
        });
        let response = err.into_response();

        assert_eq!(response.status().as_u16(), 429);
        assert_eq!(response.headers()[header::RETRY_AFTER], "2");
    }

    #[test]
    fn test_keys() {
        assert_eq!(LeadError::NotFound.error_key(), "lead_not_found");
        assert_eq!(LeadError::Duplicate.kind(), ErrorKind::Conflict);
        let err: LeadError = FormErrors(vec!["a".into(), "b".into()]).into();
        assert_eq!(err.to_string(), "a; b");
    }
}
