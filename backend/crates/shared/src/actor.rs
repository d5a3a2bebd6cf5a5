//! Acting staff member
//!
//! The identity that authenticated staff requests carry from the auth
//! guard down into the feature crates (audit entries, lead assignment).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Staff role
///
/// Ordered by privilege: `SuperAdmin` can do everything `Admin` can.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i16)]
pub enum StaffRole {
    #[default]
    Admin = 0,
    SuperAdmin = 1,
}

impl StaffRole {
    /// Roles allowed on admin dashboards (leads, moderation, analytics)
    pub const ADMINS: &'static [StaffRole] = &[StaffRole::Admin, StaffRole::SuperAdmin];

    /// Roles allowed on user management and the full audit trail
    pub const SUPER_ADMINS: &'static [StaffRole] = &[StaffRole::SuperAdmin];

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            StaffRole::Admin => "ADMIN",
            StaffRole::SuperAdmin => "SUPER_ADMIN",
        }
    }

    #[inline]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self, StaffRole::SuperAdmin)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ADMIN" => Some(StaffRole::Admin),
            "SUPER_ADMIN" => Some(StaffRole::SuperAdmin),
            _ => None,
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Authenticated staff member performing a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub username: String,
    pub role: StaffRole,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>, role: StaffRole) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            role,
        }
    }

    /// Whether this actor holds one of `allowed`
    pub fn has_any_role(&self, allowed: &[StaffRole]) -> bool {
        allowed.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes_round_trip() {
        assert_eq!(StaffRole::from_code("ADMIN"), Some(StaffRole::Admin));
        assert_eq!(StaffRole::from_code("SUPER_ADMIN"), Some(StaffRole::SuperAdmin));
        assert_eq!(StaffRole::from_code("user"), None);
        assert_eq!(StaffRole::SuperAdmin.to_string(), "SUPER_ADMIN");
    }

    #[test]
    fn test_role_serde_matches_code() {
        let json = serde_json::to_string(&StaffRole::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
    }

    #[test]
    fn test_actor_role_checks() {
        let admin = Actor::new("u1", "alice", StaffRole::Admin);
        assert!(admin.has_any_role(StaffRole::ADMINS));
        assert!(!admin.has_any_role(StaffRole::SUPER_ADMINS));

        let root = Actor::new("u2", "root", StaffRole::SuperAdmin);
        assert!(root.has_any_role(StaffRole::SUPER_ADMINS));
        assert!(root.role.is_super_admin());
    }
}
