//! Server configuration
//!
//! Read once at start-up from the environment (after `.env` is loaded).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use leads::{DuplicatePolicy, LeadsConfig};
use platform::client::ClientIpSource;
use platform::crypto::from_base64;
use platform::rate_limit::RateLimitConfig;
use store::StoreConfig;

const DEFAULT_PORT: u16 = 4000;
const DEV_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:3002",
];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub store: StoreConfig,
    pub auth: AuthConfig,
    pub leads: LeadsConfig,
    /// Global per-IP request limit
    pub request_limit: RateLimitConfig,
    /// Set when a reverse proxy in front of the server appends X-Forwarded-For
    pub trust_proxy: bool,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build from any key lookup; `development` relaxes the secret and
    /// origin requirements
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse().context("PORT must be a port number")?,
            None => DEFAULT_PORT,
        };

        let frontend_origins = match var("FRONTEND_ORIGIN") {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None if development => DEV_ORIGINS.iter().map(|o| o.to_string()).collect(),
            None => Vec::new(),
        };

        let store = StoreConfig::json(var("DATA_DIR").map(PathBuf::from).unwrap_or_else(|| "data".into()))
            .with_database_url(var("DATABASE_URL"));

        let mut auth = match var("TOKEN_SECRET") {
            Some(raw) => AuthConfig::with_secret(decode_secret(&raw)?),
            None if development => AuthConfig::development(),
            None => bail!("TOKEN_SECRET must be set in production"),
        };
        if let Some(raw) = var("TOKEN_TTL_HOURS") {
            let hours: u64 = raw.trim().parse().context("TOKEN_TTL_HOURS must be a whole number")?;
            auth.token_ttl = Duration::from_secs(hours * 3600);
        }
        if let Some(password) = var("DEFAULT_ADMIN_PASSWORD") {
            auth.default_admin_password = password;
        }

        let duplicate_policy = match var("LEAD_DUPLICATE_POLICY") {
            Some(raw) => raw.parse::<DuplicatePolicy>().map_err(anyhow::Error::msg)?,
            None => DuplicatePolicy::default(),
        };
        let leads = LeadsConfig::default().with_duplicate_policy(duplicate_policy);

        let defaults = RateLimitConfig::default();
        let max_requests = match var("RATE_LIMIT_REQUESTS") {
            Some(raw) => raw.trim().parse().context("RATE_LIMIT_REQUESTS must be a number")?,
            None => defaults.max_requests,
        };
        let window_secs = match var("RATE_LIMIT_WINDOW_SECS") {
            Some(raw) => raw.trim().parse().context("RATE_LIMIT_WINDOW_SECS must be a number")?,
            None => defaults.window.as_secs(),
        };

        let trust_proxy = match var("TRUST_PROXY") {
            Some(raw) => parse_flag(&raw).context("TRUST_PROXY must be true or false")?,
            None => false,
        };

        Ok(Self {
            port,
            frontend_origins,
            store,
            auth,
            leads,
            request_limit: RateLimitConfig::new(max_requests, window_secs),
            trust_proxy,
        })
    }

    pub fn client_ip_source(&self) -> ClientIpSource {
        if self.trust_proxy {
            ClientIpSource::ForwardedFor
        } else {
            ClientIpSource::Direct
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn decode_secret(raw: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(raw.trim()).context("TOKEN_SECRET must be base64")?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must decode to 32 bytes, got {}", bytes.len()))
}
