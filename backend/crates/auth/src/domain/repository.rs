//! Repository Traits

use kernel::id::UserId;

use crate::domain::entity::user::StaffUser;
use crate::error::AuthResult;

/// Staff user persistence
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn list(&self) -> AuthResult<Vec<StaffUser>>;

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<StaffUser>>;

    /// Case-insensitive lookup
    async fn find_by_username(&self, username: &str) -> AuthResult<Option<StaffUser>>;

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<StaffUser>>;

    async fn create(&self, user: StaffUser) -> AuthResult<StaffUser>;

    async fn update<F>(&self, id: &UserId, change: F) -> AuthResult<Option<StaffUser>>
    where
        F: FnOnce(StaffUser) -> StaffUser + Send;

    async fn delete(&self, id: &UserId) -> AuthResult<bool>;
}
