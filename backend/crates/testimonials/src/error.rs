//! Testimonial Error Types

use audit::AuditError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use store::StoreError;
use thiserror::Error;

pub type TestimonialResult<T> = Result<T, TestimonialError>;

#[derive(Debug, Error)]
pub enum TestimonialError {
    #[error("Testimonial not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

impl TestimonialError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TestimonialError::NotFound => ErrorKind::NotFound,
            TestimonialError::Validation(_) => ErrorKind::BadRequest,
            TestimonialError::Store(e) => e.kind(),
            TestimonialError::Audit(e) => e.kind(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            TestimonialError::NotFound => "testimonial_not_found",
            TestimonialError::Validation(_) => "validation_error",
            TestimonialError::Store(e) => e.error_key(),
            TestimonialError::Audit(e) => e.error_key(),
        }
    }

    fn log(&self) {
        match self {
            TestimonialError::Store(e) => e.log(),
            TestimonialError::Audit(e) => tracing::error!(error = %e, "Audit write failed"),
            _ => tracing::debug!(error = %self, "Testimonial error"),
        }
    }
}

impl From<TestimonialError> for AppError {
    fn from(err: TestimonialError) -> Self {
        match err {
            TestimonialError::Store(e) => e.into(),
            TestimonialError::Audit(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()).with_error_key(other.error_key()),
        }
    }
}

impl IntoResponse for TestimonialError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
