//! Router assembly
//!
//! Every feature router is nested under `/api`. Staff-only routers are
//! wrapped here with the role guard that matches their audience.

use std::sync::Arc;

use analytics::{AnalyticsAppState, analytics_admin_router, analytics_public_router};
use audit::{audit_log_router, audit_resource_router};
use auth::{RoleGuard, auth_router, require_role, users_router};
use axum::{Extension, Router};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::from_fn_with_state;
use leads::{LeadsAppState, leads_admin_router, leads_public_router};
use store::DocumentStore;
use testimonials::{TestimonialsAppState, testimonials_admin_router, testimonials_public_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::rate_limit::{RequestLimiter, limit_requests};

pub fn build_router<S>(store: Arc<S>, config: &ApiConfig) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    let auth_config = Arc::new(config.auth.clone());
    let admins = || from_fn_with_state(RoleGuard::admins(auth_config.clone()), require_role);
    let super_admins =
        || from_fn_with_state(RoleGuard::super_admins(auth_config.clone()), require_role);

    let leads_state = LeadsAppState::new(store.clone(), config.leads.clone());
    let leads = leads_public_router(leads_state.clone())
        .merge(leads_admin_router(leads_state).route_layer(admins()));

    let testimonials_state = TestimonialsAppState::new(store.clone());
    let testimonials = testimonials_public_router(testimonials_state.clone())
        .merge(testimonials_admin_router(testimonials_state).route_layer(admins()));

    let analytics_state = AnalyticsAppState::new(store.clone());
    let analytics = analytics_public_router(analytics_state.clone())
        .merge(analytics_admin_router(analytics_state).route_layer(admins()));

    let audit_logs = audit_log_router(store.clone())
        .route_layer(super_admins())
        .merge(audit_resource_router(store.clone()).route_layer(admins()));

    let api = Router::new()
        .nest("/auth", auth_router(store.clone(), auth_config.clone()))
        .nest("/users", users_router(store, auth_config))
        .nest("/leads", leads)
        .nest("/testimonials", testimonials)
        .nest("/analytics", analytics)
        .nest("/audit-logs", audit_logs);

    Router::new()
        .nest("/api", api)
        .layer(from_fn_with_state(
            RequestLimiter::new(config.request_limit.clone()),
            limit_requests,
        ))
        .layer(Extension(config.client_ip_source()))
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config.frontend_origins))
}

fn cors(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::SeedSuperAdminUseCase;
    use axum::body::{Body, to_bytes};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use std::net::SocketAddr;
    use serde_json::{Value, json};
    use store::JsonFileStore;
    use tower::ServiceExt;

    fn peer() -> SocketAddr {
        "203.0.113.50:51000".parse().unwrap()
    }

    async fn app() -> (tempfile::TempDir, Router) {
        app_with(|config| {
            config.request_limit = platform::rate_limit::RateLimitConfig::new(1_000, 60);
        })
        .await
    }

    async fn app_with(adjust: impl FnOnce(&mut ApiConfig)) -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let mut config = ApiConfig::from_lookup(|_| None, true).unwrap();
        adjust(&mut config);
        SeedSuperAdminUseCase::new(store.clone(), Arc::new(config.auth.clone()))
            .execute()
            .await
            .unwrap();
        (dir, build_router(store, &config))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(peer()));
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let response = app
            .clone()
            .oneshot(req.body(Body::from(body.to_string())).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            json!({ "username": "superadmin", "password": "admin123456" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["access_token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_staff_routes_require_a_token() {
        let (_dir, app) = app().await;

        for uri in ["/api/leads", "/api/testimonials/moderation", "/api/analytics/overview", "/api/audit-logs", "/api/users"] {
            let (status, _) = send(&app, "GET", uri, None, Value::Null).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        }

        let (status, _) = send(&app, "GET", "/api/testimonials", None, Value::Null).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_lead_submission_reaches_the_audit_trail() {
        let (_dir, app) = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/leads",
            None,
            json!({
                "fullName": "Ahmad bin Ali",
                "phone": "012-3456789",
                "loanAmount": 15000,
                "loanType": "BUSINESS"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        let id = body["referenceId"].as_str().unwrap().to_string();

        let token = login(&app).await;
        let (status, _) = send(
            &app,
            "PATCH",
            &format!("/api/leads/{id}/status"),
            Some(&token),
            json!({ "status": "CONTACTED" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/audit-logs/resource?resourceId={id}"),
            Some(&token),
            Value::Null,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["action"], "LEAD_STATUS_CHANGED");
    }

    #[tokio::test]
    async fn test_responses_carry_rate_limit_headers() {
        let (_dir, app) = app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/testimonials")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-ratelimit-limit"], "1000");
    }

    async fn get_with_forwarded_for(app: &Router, forwarded_for: &str) -> StatusCode {
        let req = Request::builder()
            .uri("/api/testimonials")
            .header("x-forwarded-for", forwarded_for)
            .extension(ConnectInfo(peer()))
            .body(Body::empty())
            .unwrap();
        app.clone().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_spoofed_forwarded_for_cannot_dodge_the_limit() {
        let (_dir, app) = app_with(|config| {
            config.request_limit = platform::rate_limit::RateLimitConfig::new(2, 60);
        })
        .await;

        assert_eq!(get_with_forwarded_for(&app, "198.51.100.1").await, StatusCode::OK);
        assert_eq!(get_with_forwarded_for(&app, "198.51.100.2").await, StatusCode::OK);
        assert_eq!(
            get_with_forwarded_for(&app, "198.51.100.3").await,
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[tokio::test]
    async fn test_trusted_proxy_limits_per_forwarded_client() {
        let (_dir, app) = app_with(|config| {
            config.request_limit = platform::rate_limit::RateLimitConfig::new(1, 60);
            config.trust_proxy = true;
        })
        .await;

        assert_eq!(get_with_forwarded_for(&app, "198.51.100.1").await, StatusCode::OK);
        assert_eq!(get_with_forwarded_for(&app, "198.51.100.2").await, StatusCode::OK);
        // A client-supplied first entry does not open a new window
        assert_eq!(
            get_with_forwarded_for(&app, "10.9.9.9, 198.51.100.1").await,
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
