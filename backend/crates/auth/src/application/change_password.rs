//! Change Password Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, RecordAuditUseCase, resource};
use chrono::Utc;
use kernel::actor::Actor;
use kernel::id::UserId;
use platform::client::ClientInfo;
use platform::password::ClearTextPassword;
use store::DocumentStore;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::infra::user_store::UserStore;

pub struct ChangePasswordUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    users: UserStore<S>,
    audit: RecordAuditUseCase<S>,
}

impl<S> ChangePasswordUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            users: UserStore::new(store.clone()),
            audit: RecordAuditUseCase::new(store),
        }
    }

    pub async fn execute(
        &self,
        actor: &Actor,
        old_password: String,
        new_password: String,
        client: &ClientInfo,
    ) -> AuthResult<()> {
        let id: UserId = actor.user_id.parse().map_err(|_| AuthError::UserNotFound)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.verify_password(&ClearTextPassword::for_verification(old_password)) {
            return Err(AuthError::InvalidOldPassword);
        }

        let hash = ClearTextPassword::new(new_password)?.hash()?;
        self.users
            .update(&id, move |u| u.with_password(hash, Utc::now()))
            .await?
            .ok_or(AuthError::UserNotFound)?;

        self.audit
            .execute(
                AuditEntry::by(actor, AuditAction::PasswordChanged, resource::USER)
                    .resource_id(id.to_string())
                    .client(client),
            )
            .await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }
}
