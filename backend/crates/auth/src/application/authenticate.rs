//! Authenticate Use Case
//!
//! Turns a bearer token into the acting staff member.

use std::sync::Arc;

use chrono::Utc;
use kernel::actor::Actor;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::StaffUser;
use crate::domain::token::{self, TokenClaims};
use crate::error::AuthResult;

pub struct AuthenticateUseCase {
    config: Arc<AuthConfig>,
}

impl AuthenticateUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, bearer: &str) -> AuthResult<Actor> {
        self.execute_at(bearer, Utc::now().timestamp())
    }

    /// `now` is unix seconds
    pub fn execute_at(&self, bearer: &str, now: i64) -> AuthResult<Actor> {
        let claims = token::verify(bearer, &self.config.token_secret, now)?;
        Ok(claims.actor())
    }

    /// Sign a fresh access token for `user`
    pub fn issue(&self, user: &StaffUser) -> AuthResult<String> {
        let claims = TokenClaims::for_user(
            user,
            Utc::now().timestamp(),
            self.config.token_ttl_secs(),
        );
        token::sign(&claims, &self.config.token_secret)
    }
}
