//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use audit::AuditError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use store::StoreError;
use thiserror::Error;

use crate::domain::value_object::{EmailError, UserNameError};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UsernameTaken,

    #[error("Email already exists")]
    EmailTaken,

    /// Unknown user, wrong password or inactive account
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Current password is incorrect")]
    InvalidOldPassword,

    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Insufficient role")]
    Forbidden,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error(transparent)]
    PasswordHash(#[from] PasswordHashError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<EmailError> for AuthError {
    fn from(err: EmailError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UsernameTaken | AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::InvalidOldPassword
            | AuthError::MissingToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::Store(e) => e.kind(),
            AuthError::Audit(e) => e.kind(),
            AuthError::PasswordHash(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable key for clients
    pub fn error_key(&self) -> &'static str {
        match self {
            AuthError::UserNotFound => "user_not_found",
            AuthError::UsernameTaken => "username_exists",
            AuthError::EmailTaken => "email_exists",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InvalidOldPassword => "invalid_old_password",
            AuthError::MissingToken | AuthError::InvalidToken => "unauthorized",
            AuthError::Forbidden => "forbidden",
            AuthError::Validation(_) | AuthError::PasswordPolicy(_) => "validation_error",
            AuthError::Store(e) => e.error_key(),
            AuthError::Audit(e) => e.error_key(),
            AuthError::PasswordHash(_) | AuthError::Internal(_) => "server_error",
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Store(e) => e.log(),
            AuthError::Audit(e) => tracing::error!(error = %e, "Audit write failed"),
            AuthError::PasswordHash(e) => tracing::error!(error = %e, "Password hashing failed"),
            AuthError::Internal(msg) => tracing::error!(message = %msg, "Auth internal error"),
            AuthError::InvalidCredentials => tracing::warn!("Invalid login attempt"),
            AuthError::Forbidden => tracing::warn!("Role check failed"),
            _ => tracing::debug!(error = %self, "Auth error"),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(e) => e.into(),
            AuthError::Audit(e) => e.into(),
            other => AppError::new(other.kind(), other.to_string()).with_error_key(other.error_key()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
