//! HTTP Handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use kernel::actor::Actor;
use kernel::id::UserId;
use platform::client::ClientInfo;
use store::DocumentStore;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangePasswordUseCase, CreateUserInput, ManageUsersUseCase, SignInInput, SignInUseCase,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ChangePasswordRequest, ChangeRoleRequest, CreateUserRequest, LoginRequest, LoginResponse,
    MessageResponse, UserView,
};

/// Shared state for auth handlers
pub struct AuthAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> Clone for AuthAppState<S>
where
    S: DocumentStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

fn parse_user_id(raw: &str) -> AuthResult<UserId> {
    raw.parse().map_err(|_| AuthError::UserNotFound)
}

// ============================================================================
// Session
// ============================================================================

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let input = SignInInput {
        username: req.username,
        password: req.password,
    };
    let output = SignInUseCase::new(state.store.clone(), state.config.clone())
        .execute(input, &client)
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        user: output.user.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(Extension(actor): Extension<Actor>) -> Json<Actor> {
    Json(actor)
}

/// PATCH /api/auth/change-password
pub async fn change_password<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    ChangePasswordUseCase::new(state.store.clone())
        .execute(&actor, req.old_password, req.new_password, &client)
        .await?;

    Ok(Json(MessageResponse::new("Password changed successfully")))
}

// ============================================================================
// User Management
// ============================================================================

/// POST /api/users
pub async fn create_user<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserView>)>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let input = CreateUserInput {
        username: req.username,
        email: req.email,
        password: req.password,
        role: req.role,
    };
    let user = ManageUsersUseCase::new(state.store.clone())
        .create(&actor, input, &client)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list_users<S>(
    State(state): State<AuthAppState<S>>,
) -> AuthResult<Json<Vec<UserView>>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let users = ManageUsersUseCase::new(state.store.clone()).list().await?;
    Ok(Json(users.into_iter().map(UserView::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserView>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let user = ManageUsersUseCase::new(state.store.clone()).get(&id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/users/{id}/activate
pub async fn activate_user<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    ManageUsersUseCase::new(state.store.clone())
        .set_active(&id, true)
        .await?;
    Ok(Json(MessageResponse::new("User activated successfully")))
}

/// PATCH /api/users/{id}/deactivate
pub async fn deactivate_user<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    ManageUsersUseCase::new(state.store.clone())
        .set_active(&id, false)
        .await?;
    Ok(Json(MessageResponse::new("User deactivated successfully")))
}

/// PATCH /api/users/{id}/role
pub async fn change_role<S>(
    State(state): State<AuthAppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<ChangeRoleRequest>,
) -> AuthResult<Json<UserView>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    let user = ManageUsersUseCase::new(state.store.clone())
        .change_role(&id, req.role)
        .await?;
    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn delete_user<S>(
    State(state): State<AuthAppState<S>>,
    Extension(actor): Extension<Actor>,
    client: ClientInfo,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    S: DocumentStore + Send + Sync + 'static,
{
    let id = parse_user_id(&id)?;
    ManageUsersUseCase::new(state.store.clone())
        .delete(&actor, &id, &client)
        .await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
