//! Analytics Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use store::StoreError;
use thiserror::Error;

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AnalyticsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalyticsError::Validation(_) => ErrorKind::BadRequest,
            AnalyticsError::Store(e) => e.kind(),
        }
    }

    pub fn error_key(&self) -> &'static str {
        match self {
            AnalyticsError::Validation(_) => "validation_error",
            AnalyticsError::Store(e) => e.error_key(),
        }
    }
}

impl From<AnalyticsError> for AppError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::Store(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()).with_error_key(other.error_key()),
        }
    }
}

impl IntoResponse for AnalyticsError {
    fn into_response(self) -> Response {
        match &self {
            AnalyticsError::Store(e) => e.log(),
            _ => tracing::debug!(error = %self, "Analytics error"),
        }
        AppError::from(self).into_response()
    }
}
