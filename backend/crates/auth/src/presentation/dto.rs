//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::actor::StaffRole;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::StaffUser;

// ============================================================================
// Sign In
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserSummary,
}

/// The signed-in user as returned with a token
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: StaffRole,
}

impl From<StaffUser> for UserSummary {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

// ============================================================================
// User Management
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: StaffRole,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: StaffRole,
}

/// A staff account without its password hash
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: StaffRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<StaffUser> for UserView {
    fn from(user: StaffUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_role_defaults_to_admin() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"username":"aminah","email":"aminah@example.com","password":"password123"}"#,
        )
        .unwrap();
        assert_eq!(req.role, StaffRole::Admin);
    }

    #[test]
    fn test_user_view_has_no_hash() {
        let view = UserView {
            id: UserId::new(),
            username: "siti".into(),
            email: "siti@example.com".into(),
            role: StaffRole::SuperAdmin,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(view).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert_eq!(value["role"], "SUPER_ADMIN");
        assert_eq!(value["isActive"], true);
    }
}
