//! Auth Routers

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, patch, post},
};
use store::DocumentStore;

use crate::application::config::AuthConfig;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{RoleGuard, require_role};

/// `/login` (public), `/me` and `/change-password` (any staff)
pub fn auth_router<S>(store: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let state = AuthAppState {
        store,
        config: config.clone(),
    };

    let session = Router::new()
        .route("/me", get(handlers::me))
        .route("/change-password", patch(handlers::change_password::<S>))
        .route_layer(from_fn_with_state(RoleGuard::admins(config), require_role));

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .merge(session)
        .with_state(state)
}

/// User management, super admins only
pub fn users_router<S>(store: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let state = AuthAppState {
        store,
        config: config.clone(),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_users::<S>).post(handlers::create_user::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_user::<S>).delete(handlers::delete_user::<S>),
        )
        .route("/{id}/activate", patch(handlers::activate_user::<S>))
        .route("/{id}/deactivate", patch(handlers::deactivate_user::<S>))
        .route("/{id}/role", patch(handlers::change_role::<S>))
        .route_layer(from_fn_with_state(RoleGuard::super_admins(config), require_role))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{add_user, store};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kernel::actor::StaffRole;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(req).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        req.body(Body::from(body.to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_login_then_manage_users() {
        let (_dir, store) = store().await;
        add_user(&store, "root", "password123", StaffRole::SuperAdmin).await;
        let config = Arc::new(AuthConfig::with_random_secret());
        let auth = auth_router(store.clone(), config.clone());
        let users = users_router(store.clone(), config);

        let (status, body) = send(
            auth.clone(),
            json_request(
                "POST",
                "/login",
                None,
                json!({ "username": "root", "password": "password123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["role"], "SUPER_ADMIN");
        assert!(body["user"].get("passwordHash").is_none());
        assert!(body.get("accessToken").is_none());
        let token = body["access_token"].as_str().unwrap().to_string();

        let (status, body) = send(
            auth.clone(),
            json_request("GET", "/me", Some(&token), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "root");

        let (status, body) = send(
            users.clone(),
            json_request(
                "POST",
                "/",
                Some(&token),
                json!({ "username": "siti", "email": "siti@example.com", "password": "password123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["role"], "ADMIN");

        let (status, body) = send(
            users.clone(),
            json_request(
                "POST",
                "/",
                Some(&token),
                json!({ "username": "Siti", "email": "x@example.com", "password": "password123" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errorKey"], "username_exists");

        let (status, body) = send(users, json_request("GET", "/", Some(&token), Value::Null)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_login_failure_body() {
        let (_dir, store) = store().await;
        add_user(&store, "root", "password123", StaffRole::SuperAdmin).await;
        let auth = auth_router(store, Arc::new(AuthConfig::with_random_secret()));

        let (status, body) = send(
            auth,
            json_request(
                "POST",
                "/login",
                None,
                json!({ "username": "root", "password": "wrong-password" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["errorKey"], "invalid_credentials");
    }

    #[tokio::test]
    async fn test_unknown_user_id_is_not_found() {
        let (_dir, store) = store().await;
        add_user(&store, "root", "password123", StaffRole::SuperAdmin).await;
        let config = Arc::new(AuthConfig::with_random_secret());
        let auth = auth_router(store.clone(), config.clone());
        let users = users_router(store, config);

        let (_, body) = send(
            auth,
            json_request(
                "POST",
                "/login",
                None,
                json!({ "username": "root", "password": "password123" }),
            ),
        )
        .await;
        let token = body["access_token"].as_str().unwrap().to_string();

        let (status, body) = send(
            users,
            json_request("GET", "/not-a-uuid", Some(&token), Value::Null),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errorKey"], "user_not_found");
    }
}
