//! Access Tokens
//!
//! Stateless HS256 JWT bearer tokens.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::actor::{Actor, StaffRole};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::StaffUser;
use crate::error::{AuthError, AuthResult};

/// Signed token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: StaffRole,
    /// Issued at, unix seconds
    pub iat: i64,
    /// Expires at, unix seconds
    pub exp: i64,
}

impl TokenClaims {
    pub fn for_user(user: &StaffUser, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
        }
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    pub fn actor(&self) -> Actor {
        Actor::new(&self.sub, &self.username, self.role)
    }
}

pub fn sign(claims: &TokenClaims, key: &[u8; 32]) -> AuthResult<String> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
    .map_err(|e| AuthError::Internal(format!("Failed to sign access token: {e}")))
}

/// Check signature and expiry against `now`; every failure is [`AuthError::InvalidToken`]
pub fn verify(token: &str, key: &[u8; 32], now: i64) -> AuthResult<TokenClaims> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is checked below against the caller's clock.
    validation.validate_exp = false;
    validation.leeway = 0;

    let claims = decode::<TokenClaims>(token, &DecodingKey::from_secret(key), &validation)
        .map_err(|_| AuthError::InvalidToken)?
        .claims;

    if claims.is_expired_at(now) {
        return Err(AuthError::InvalidToken);
    }

    Ok(claims)
}
