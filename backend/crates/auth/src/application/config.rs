//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::crypto::random_key;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing key for access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Password given to the seeded super admin
    pub default_admin_password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600),
            default_admin_password: "admin123456".to_string(),
        }
    }
}

impl AuthConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: random_key(),
            ..Default::default()
        }
    }

    /// Create config for development; tokens do not survive restarts
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn with_secret(secret: [u8; 32]) -> Self {
        Self {
            token_secret: secret,
            ..Default::default()
        }
    }

    /// Get token TTL in seconds
    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }
}
