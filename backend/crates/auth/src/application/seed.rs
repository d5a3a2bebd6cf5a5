//! Seed Super Admin Use Case
//!
//! Start-up bootstrap: an empty users collection gets one super admin.

use std::sync::Arc;

use chrono::Utc;
use kernel::actor::StaffRole;
use platform::password::ClearTextPassword;
use store::DocumentStore;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::StaffUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName};
use crate::error::AuthResult;
use crate::infra::user_store::UserStore;

pub const SUPER_ADMIN_USERNAME: &str = "superadmin";
pub const SUPER_ADMIN_EMAIL: &str = "admin@mypinjamcredit.com";

pub struct SeedSuperAdminUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    users: UserStore<S>,
    config: Arc<AuthConfig>,
}

impl<S> SeedSuperAdminUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users: UserStore::new(store),
            config,
        }
    }

    /// The seeded account, or `None` when users already exist
    pub async fn execute(&self) -> AuthResult<Option<StaffUser>> {
        if !self.users.list().await?.is_empty() {
            return Ok(None);
        }

        let password = ClearTextPassword::new(self.config.default_admin_password.clone())?;
        let user = StaffUser::new(
            UserName::new(SUPER_ADMIN_USERNAME)?,
            Email::new(SUPER_ADMIN_EMAIL)?,
            password.hash()?,
            StaffRole::SuperAdmin,
            Utc::now(),
        );
        let user = self.users.create(user).await?;

        tracing::warn!(
            username = SUPER_ADMIN_USERNAME,
            "Seeded default super admin; change its password after first sign-in"
        );
        Ok(Some(user))
    }
}
