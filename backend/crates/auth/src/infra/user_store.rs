//! Users over the document store

use std::sync::Arc;

use kernel::id::UserId;
use store::{DocumentStore, collections};

use crate::domain::entity::user::StaffUser;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

/// [`UserRepository`] backed by the `users` collection
pub struct UserStore<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    store: Arc<S>,
}

impl<S> UserStore<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> UserRepository for UserStore<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    async fn list(&self) -> AuthResult<Vec<StaffUser>> {
        Ok(self.store.find_all(collections::USERS).await?)
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<StaffUser>> {
        let id = *id;
        Ok(self
            .store
            .find_one(collections::USERS, move |u: &StaffUser| u.id == id)
            .await?)
    }

    async fn find_by_username(&self, username: &str) -> AuthResult<Option<StaffUser>> {
        let username = username.to_string();
        Ok(self
            .store
            .find_one(collections::USERS, move |u: &StaffUser| {
                u.has_username(&username)
            })
            .await?)
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<StaffUser>> {
        let email = email.to_string();
        Ok(self
            .store
            .find_one(collections::USERS, move |u: &StaffUser| u.has_email(&email))
            .await?)
    }

    async fn create(&self, user: StaffUser) -> AuthResult<StaffUser> {
        Ok(self.store.create(collections::USERS, user).await?)
    }

    async fn update<F>(&self, id: &UserId, change: F) -> AuthResult<Option<StaffUser>>
    where
        F: FnOnce(StaffUser) -> StaffUser + Send,
    {
        let id = *id;
        Ok(self
            .store
            .update(collections::USERS, move |u: &StaffUser| u.id == id, change)
            .await?)
    }

    async fn delete(&self, id: &UserId) -> AuthResult<bool> {
        let id = *id;
        Ok(self
            .store
            .delete(collections::USERS, move |u: &StaffUser| u.id == id)
            .await?)
    }
}
