//! Manage Users Use Case
//!
//! SuperAdmin account administration.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, RecordAuditUseCase, resource};
use chrono::Utc;
use kernel::actor::{Actor, StaffRole};
use kernel::id::UserId;
use platform::client::ClientInfo;
use platform::password::ClearTextPassword;
use serde_json::json;
use store::DocumentStore;

use crate::domain::entity::user::StaffUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, UserName};
use crate::error::{AuthError, AuthResult};
use crate::infra::user_store::UserStore;

pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: StaffRole,
}

pub struct ManageUsersUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    users: UserStore<S>,
    audit: RecordAuditUseCase<S>,
}

impl<S> ManageUsersUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            users: UserStore::new(store.clone()),
            audit: RecordAuditUseCase::new(store),
        }
    }

    /// Create an account; usernames and emails are unique
    pub async fn create(
        &self,
        actor: &Actor,
        input: CreateUserInput,
        client: &ClientInfo,
    ) -> AuthResult<StaffUser> {
        let username = UserName::new(&input.username)?;
        let email = Email::new(&input.email)?;
        let password = ClearTextPassword::new(input.password)?;

        if self.users.find_by_username(username.as_str()).await?.is_some() {
            return Err(AuthError::UsernameTaken);
        }
        if self.users.find_by_email(email.as_str()).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let user = StaffUser::new(username, email, password.hash()?, input.role, Utc::now());
        let user = self.users.create(user).await?;

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::UserCreated, resource::USER)
                    .resource_id(user.id.to_string())
                    .details(json!({
                        "createdUsername": user.username,
                        "role": user.role,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, role = %user.role, "Staff user created");
        Ok(user)
    }

    pub async fn list(&self) -> AuthResult<Vec<StaffUser>> {
        self.users.list().await
    }

    pub async fn get(&self, id: &UserId) -> AuthResult<StaffUser> {
        self.users.find_by_id(id).await?.ok_or(AuthError::UserNotFound)
    }

    pub async fn set_active(&self, id: &UserId, is_active: bool) -> AuthResult<StaffUser> {
        let user = self
            .users
            .update(id, move |u| u.with_active(is_active, Utc::now()))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %id, is_active, "Staff user activation changed");
        Ok(user)
    }

    pub async fn change_role(&self, id: &UserId, role: StaffRole) -> AuthResult<StaffUser> {
        let user = self
            .users
            .update(id, move |u| u.with_role(role, Utc::now()))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %id, role = %role, "Staff user role changed");
        Ok(user)
    }

    pub async fn delete(&self, actor: &Actor, id: &UserId, client: &ClientInfo) -> AuthResult<()> {
        let user = self.get(id).await?;

        if !self.users.delete(id).await? {
            return Err(AuthError::UserNotFound);
        }

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::UserDeleted, resource::USER)
                    .resource_id(id.to_string())
                    .details(json!({
                        "deletedUsername": user.username,
                        "deletedEmail": user.email,
                        "deletedRole": user.role,
                    }))
                    .client(client),
            )
            .await?;

        tracing::info!(user_id = %id, "Staff user deleted");
        Ok(())
    }
}
