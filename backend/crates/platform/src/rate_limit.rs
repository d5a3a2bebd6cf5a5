//! Rate Limiting Infrastructure
//!
//! Sliding-window rate limiting keyed by an arbitrary identifier.
//!
//! Two consumers share the same window store:
//! - [`SubmissionThrottle`] bounds public form submissions per `phone:<v>` /
//!   `ip:<v>` identifier (3 per minute by default).
//! - The API's global per-IP request limiter, through [`RateLimitStore`].

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use thiserror::Error;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }

    /// Public form submissions: 3 per identifier per minute
    pub fn submissions() -> Self {
        Self::new(3, 60)
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Check the counter for `key` and record the hit when allowed
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-memory sliding window
// ============================================================================

/// Identifier count above which a check also sweeps idle identifiers
pub const DEFAULT_SWEEP_THRESHOLD: usize = 10_000;

/// Process-local sliding window store
///
/// Keeps the accepted hit timestamps (ms) per identifier. A timestamp `t`
/// counts while `now - t < window`. Rejected attempts are never recorded.
///
/// All identifiers share one lock: the read-filter-append sequence for a
/// key is a critical section and contention is low.
#[derive(Debug)]
pub struct SlidingWindowStore {
    windows: Mutex<HashMap<String, VecDeque<i64>>>,
    sweep_threshold: usize,
}

impl Default for SlidingWindowStore {
    fn default() -> Self {
        Self::new(DEFAULT_SWEEP_THRESHOLD)
    }
}

impl SlidingWindowStore {
    pub fn new(sweep_threshold: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            sweep_threshold,
        }
    }

    /// Check `key` at an explicit instant
    pub fn check_and_increment_at(
        &self,
        key: &str,
        config: &RateLimitConfig,
        now_ms: i64,
    ) -> RateLimitResult {
        let window_ms = config.window_ms();
        // A panic while holding the lock cannot leave a half-written window
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        if windows.len() > self.sweep_threshold {
            let before = windows.len();
            windows.retain(|_, hits| hits.iter().any(|&t| now_ms - t < window_ms));
            tracing::debug!(
                removed = before - windows.len(),
                remaining = windows.len(),
                "Swept idle rate limit identifiers"
            );
        }

        let hits = windows.entry(key.to_string()).or_default();
        hits.retain(|&t| now_ms - t < window_ms);

        let used = hits.len() as u32;
        if used >= config.max_requests {
            let oldest = hits.iter().copied().min().unwrap_or(now_ms);
            return RateLimitResult {
                allowed: false,
                remaining: 0,
                reset_at_ms: oldest + window_ms,
            };
        }

        hits.push_back(now_ms);
        let oldest = hits.iter().copied().min().unwrap_or(now_ms);

        RateLimitResult {
            allowed: true,
            remaining: config.max_requests - used - 1,
            reset_at_ms: oldest + window_ms,
        }
    }

    /// Number of identifiers currently tracked
    pub fn tracked_identifiers(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl RateLimitStore for SlidingWindowStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_and_increment_at(key, config, now_ms()))
    }
}

/// Current Unix time in milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

// ============================================================================
// Submission throttle
// ============================================================================

/// Submission rejected by the throttle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Too many submissions for {identifier}, retry after {retry_after_ms} ms")]
pub struct ThrottleExceeded {
    pub identifier: String,
    pub retry_after_ms: i64,
}

/// Throttle configuration
#[derive(Debug, Clone)]
pub struct ThrottleConfig {
    pub limit: RateLimitConfig,
    pub sweep_threshold: usize,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            limit: RateLimitConfig::submissions(),
            sweep_threshold: DEFAULT_SWEEP_THRESHOLD,
        }
    }
}

/// Per-identifier submission throttle
///
/// ## Examples
/// ```rust
/// use platform::rate_limit::{SubmissionThrottle, ThrottleConfig};
///
/// let throttle = SubmissionThrottle::new(ThrottleConfig::default());
/// for _ in 0..3 {
///     assert!(throttle.check_and_record_at("phone:012-3456789", 1_000).is_ok());
/// }
/// assert!(throttle.check_and_record_at("phone:012-3456789", 2_000).is_err());
/// ```
#[derive(Debug)]
pub struct SubmissionThrottle {
    store: SlidingWindowStore,
    limit: RateLimitConfig,
}

impl Default for SubmissionThrottle {
    fn default() -> Self {
        Self::new(ThrottleConfig::default())
    }
}

impl SubmissionThrottle {
    pub fn new(config: ThrottleConfig) -> Self {
        Self {
            store: SlidingWindowStore::new(config.sweep_threshold),
            limit: config.limit,
        }
    }

    /// Record a submission for `identifier` now, or reject it
    pub fn check_and_record(&self, identifier: &str) -> Result<(), ThrottleExceeded> {
        self.check_and_record_at(identifier, now_ms())
    }

    /// Record a submission for `identifier` at `now_ms`, or reject it
    pub fn check_and_record_at(&self, identifier: &str, now_ms: i64) -> Result<(), ThrottleExceeded> {
        let result = self.store.check_and_increment_at(identifier, &self.limit, now_ms);
        if result.allowed {
            Ok(())
        } else {
            Err(ThrottleExceeded {
                identifier: identifier.to_string(),
                retry_after_ms: (result.reset_at_ms - now_ms).max(0),
            })
        }
    }

    pub fn tracked_identifiers(&self) -> usize {
        self.store.tracked_identifiers()
    }
}
