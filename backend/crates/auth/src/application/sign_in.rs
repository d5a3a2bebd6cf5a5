//! Sign In Use Case
//!
//! Authenticates a staff member and issues an access token.

use std::sync::Arc;

use audit::{AuditAction, AuditEntry, RecordAuditUseCase, resource};
use platform::client::ClientInfo;
use platform::password::ClearTextPassword;
use serde_json::json;
use store::DocumentStore;

use crate::application::authenticate::AuthenticateUseCase;
use crate::application::config::AuthConfig;
use crate::domain::entity::user::StaffUser;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::infra::user_store::UserStore;

/// Sign in input
pub struct SignInInput {
    pub username: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub access_token: String,
    pub user: StaffUser,
}

/// Sign in use case
pub struct SignInUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    users: UserStore<S>,
    audit: RecordAuditUseCase<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignInUseCase<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            users: UserStore::new(store.clone()),
            audit: RecordAuditUseCase::new(store),
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput, client: &ClientInfo) -> AuthResult<SignInOutput> {
        let user = self.users.find_by_username(&input.username).await?;
        let password = ClearTextPassword::for_verification(input.password);

        let user = match user {
            Some(user) if user.is_active && user.verify_password(&password) => user,
            other => {
                let reason = match &other {
                    None => "unknown_user",
                    Some(user) if !user.is_active => "inactive",
                    Some(_) => "wrong_password",
                };
                let user_id = other
                    .as_ref()
                    .map(|u| u.id.to_string())
                    .unwrap_or_else(|| "unknown".to_string());

                self.audit
                    .execute(
                        AuditEntry::new(
                            AuditAction::LoginFailed,
                            user_id,
                            input.username.trim(),
                            resource::AUTH,
                        )
                        .details(json!({ "reason": reason }))
                        .client(client),
                    )
                    .await?;

                return Err(AuthError::InvalidCredentials);
            }
        };

        let access_token = AuthenticateUseCase::new(self.config.clone()).issue(&user)?;

        self.audit
            .execute(
                AuditEntry::by(&user.actor(), AuditAction::LoginSuccess, resource::AUTH)
                    .resource_id(user.id.to_string())
                    .client(client),
            )
            .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "Staff signed in");

        Ok(SignInOutput { access_token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{add_user, store};
    use audit::{AuditFilter, QueryAuditLogsUseCase};
    use kernel::actor::StaffRole;

    fn input(username: &str, password: &str) -> SignInInput {
        SignInInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_verifiable_token() {
        let (_dir, store) = store().await;
        let user = add_user(&store, "siti", "password123", StaffRole::Admin).await;
        let config = Arc::new(AuthConfig::with_random_secret());

        let output = SignInUseCase::new(store.clone(), config.clone())
            .execute(input("Siti", "password123"), &ClientInfo::default())
            .await
            .unwrap();

        let actor = AuthenticateUseCase::new(config)
            .execute(&output.access_token)
            .unwrap();
        assert_eq!(actor.user_id, user.id.to_string());
        assert_eq!(actor.role, StaffRole::Admin);

        let logs = QueryAuditLogsUseCase::new(store)
            .execute(&AuditFilter::default())
            .await
            .unwrap();
        assert_eq!(logs[0].action, AuditAction::LoginSuccess);
    }

    #[tokio::test]
    async fn test_wrong_password_is_audited() {
        let (_dir, store) = store().await;
        add_user(&store, "siti", "password123", StaffRole::Admin).await;
        let use_case = SignInUseCase::new(store.clone(), Arc::new(AuthConfig::default()));

        let err = use_case
            .execute(input("siti", "password124"), &ClientInfo::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = use_case
            .execute(input("nobody", "password123"), &ClientInfo::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AuthError::InvalidCredentials));

        let filter = AuditFilter {
            action: Some(AuditAction::LoginFailed),
            ..Default::default()
        };
        let logs = QueryAuditLogsUseCase::new(store).execute(&filter).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().any(|l| l.user_id == "unknown" && l.username == "nobody"));
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_sign_in() {
        let (_dir, store) = store().await;
        let user = add_user(&store, "siti", "password123", StaffRole::Admin).await;
        UserStore::new(store.clone())
            .update(&user.id, |u| u.with_active(false, chrono::Utc::now()))
            .await
            .unwrap();

        let result = SignInUseCase::new(store, Arc::new(AuthConfig::default()))
            .execute(input("siti", "password123"), &ClientInfo::default())
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }
}
