//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod change_password;
pub mod config;
pub mod manage_users;
pub mod seed;
pub mod sign_in;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use change_password::ChangePasswordUseCase;
pub use manage_users::{CreateUserInput, ManageUsersUseCase};
pub use seed::SeedSuperAdminUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use chrono::Utc;
    use kernel::actor::StaffRole;
    use platform::password::ClearTextPassword;
    use store::JsonFileStore;

    use crate::domain::entity::user::StaffUser;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::{Email, UserName};
    use crate::infra::user_store::UserStore;

    pub async fn store() -> (tempfile::TempDir, Arc<JsonFileStore>) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        (dir, store)
    }

    pub async fn add_user(
        store: &Arc<JsonFileStore>,
        username: &str,
        password: &str,
        role: StaffRole,
    ) -> StaffUser {
        let hash = ClearTextPassword::new(password.to_string())
            .unwrap()
            .hash()
            .unwrap();
        let user = StaffUser::new(
            UserName::new(username).unwrap(),
            Email::new(format!("{username}@example.com")).unwrap(),
            hash,
            role,
            Utc::now(),
        );
        UserStore::new(store.clone()).create(user).await.unwrap()
    }
}
