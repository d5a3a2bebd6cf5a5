//! Application Configuration

use std::str::FromStr;

use platform::rate_limit::ThrottleConfig;

/// What to do when a submission repeats a known phone or email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Store every submission; staff sort out repeats
    #[default]
    Allow,
    /// Refuse with `409 duplicate_lead`
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(DuplicatePolicy::Allow),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(format!("unknown duplicate policy `{other}`, expected allow or reject")),
        }
    }
}

/// Leads application configuration
#[derive(Debug, Clone, Default)]
pub struct LeadsConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub throttle: ThrottleConfig,
}

impl LeadsConfig {
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }
}
