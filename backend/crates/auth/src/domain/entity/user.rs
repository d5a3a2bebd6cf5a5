//! Staff User Entity

use chrono::{DateTime, Utc};
use kernel::actor::{Actor, StaffRole};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, HashedPassword};
use serde::{Deserialize, Serialize};
use store::Record;

use crate::domain::value_object::{Email, UserName};

/// Persisted staff account
///
/// `password_hash` is a PHC string and never leaves the crate through
/// responses; handlers render [`UserView`](crate::presentation::dto::UserView).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: StaffRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record for StaffUser {
    fn record_id(&self) -> String {
        self.id.to_string()
    }
}

impl StaffUser {
    pub fn new(
        username: UserName,
        email: Email,
        password: HashedPassword,
        role: StaffRole,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into_inner(),
            email: email.into_inner(),
            password_hash: password.into_phc_string(),
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Identity carried by this user's requests
    pub fn actor(&self) -> Actor {
        Actor::new(self.id.to_string(), &self.username, self.role)
    }

    pub fn has_username(&self, candidate: &str) -> bool {
        UserName::matches(&self.username, candidate)
    }

    pub fn has_email(&self, candidate: &str) -> bool {
        self.email.eq_ignore_ascii_case(candidate.trim())
    }

    /// Check a password against the stored hash; an unreadable hash never matches
    pub fn verify_password(&self, password: &ClearTextPassword) -> bool {
        match HashedPassword::from_phc_string(self.password_hash.as_str()) {
            Ok(hash) => hash.verify(password),
            Err(e) => {
                tracing::warn!(user_id = %self.id, error = %e, "Stored password hash is unreadable");
                false
            }
        }
    }

    pub fn with_password(mut self, password: HashedPassword, now: DateTime<Utc>) -> Self {
        self.password_hash = password.into_phc_string();
        self.updated_at = now;
        self
    }

    pub fn with_active(mut self, is_active: bool, now: DateTime<Utc>) -> Self {
        self.is_active = is_active;
        self.updated_at = now;
        self
    }

    pub fn with_role(mut self, role: StaffRole, now: DateTime<Utc>) -> Self {
        self.role = role;
        self.updated_at = now;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: &str) -> StaffUser {
        let hash = ClearTextPassword::new(password.to_string())
            .unwrap()
            .hash()
            .unwrap();
        StaffUser::new(
            UserName::new("siti").unwrap(),
            Email::new("siti@example.com").unwrap(),
            hash,
            StaffRole::Admin,
            Utc::now(),
        )
    }

    #[test]
    fn test_verify_password() {
        let user = user("correct horse");
        assert!(user.verify_password(&ClearTextPassword::for_verification("correct horse".into())));
        assert!(!user.verify_password(&ClearTextPassword::for_verification("wrong horse".into())));
    }

    #[test]
    fn test_corrupt_hash_never_matches() {
        let mut user = user("correct horse");
        user.password_hash = "not-a-phc-string".into();
        assert!(!user.verify_password(&ClearTextPassword::for_verification("correct horse".into())));
    }

    #[test]
    fn test_actor_and_lookups() {
        let user = user("correct horse");
        let actor = user.actor();

        assert_eq!(actor.user_id, user.id.to_string());
        assert_eq!(actor.role, StaffRole::Admin);
        assert!(user.has_username("SITI"));
        assert!(user.has_email("Siti@Example.com"));
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let value = serde_json::to_value(user("correct horse")).unwrap();
        assert_eq!(value["role"], "ADMIN");
        assert_eq!(value["isActive"], true);
        assert!(value["passwordHash"].as_str().unwrap().starts_with("$argon2id$"));
    }
}
