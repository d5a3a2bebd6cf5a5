//! Audit Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use store::StoreError;
use thiserror::Error;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::InvalidFilter(_) => ErrorKind::BadRequest,
            AuditError::Store(e) => e.kind(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            AuditError::InvalidFilter(_) => "validation_error",
            AuditError::Store(e) => e.error_key(),
        }
    }

    fn log(&self) {
        match self {
            AuditError::Store(e) => e.log(),
            _ => tracing::debug!(error = %self, "Audit error"),
        }
    }
}

impl From<AuditError> for AppError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Store(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()).with_error_key(other.error_key()),
        }
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
