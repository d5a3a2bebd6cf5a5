//! Auth Middleware
//!
//! Role guard for protected routes. Layer it with
//! `axum::middleware::from_fn_with_state(RoleGuard::admins(config), require_role)`;
//! handlers behind it read the caller with `Extension<Actor>`.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, header};
use axum::middleware::Next;
use axum::response::Response;
use kernel::actor::StaffRole;

use crate::application::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct RoleGuard {
    pub config: Arc<AuthConfig>,
    pub allowed: &'static [StaffRole],
}

impl RoleGuard {
    pub fn new(config: Arc<AuthConfig>, allowed: &'static [StaffRole]) -> Self {
        Self { config, allowed }
    }

    /// Any staff member
    pub fn admins(config: Arc<AuthConfig>) -> Self {
        Self::new(config, StaffRole::ADMINS)
    }

    pub fn super_admins(config: Arc<AuthConfig>) -> Self {
        Self::new(config, StaffRole::SUPER_ADMINS)
    }
}

/// Middleware that requires a valid token carrying one of the allowed roles
pub async fn require_role(
    State(guard): State<RoleGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let token = bearer_token(req.headers()).ok_or(AuthError::MissingToken)?;
    let actor = AuthenticateUseCase::new(guard.config.clone()).execute(token)?;

    if !actor.has_any_role(guard.allowed) {
        tracing::warn!(user_id = %actor.user_id, role = %actor.role, "Role not allowed");
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
