//! Analytics Routers

use axum::{
    Router,
    routing::{get, post},
};
use store::DocumentStore;

use crate::presentation::handlers::{self, AnalyticsAppState};

/// `POST /track`
pub fn analytics_public_router<S>(state: AnalyticsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/track", post(handlers::track::<S>))
        .with_state(state)
}

/// Dashboard figures
pub fn analytics_admin_router<S>(state: AnalyticsAppState<S>) -> Router
where
    S: DocumentStore + Send + Sync + 'static,
{
    Router::new()
        .route("/daily-stats", get(handlers::daily_stats::<S>))
        .route("/total-views", get(handlers::total_views::<S>))
        .route("/today-views", get(handlers::today_views::<S>))
        .route("/unique-visitors", get(handlers::unique_visitors::<S>))
        .route("/overview", get(handlers::overview::<S>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use store::JsonFileStore;
    use tower::ServiceExt;

    async fn send(app: &Router, method: &str, uri: &str, body: Value, ip: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .extension(ConnectInfo(SocketAddr::new(ip.parse().unwrap(), 443)))
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_track_then_read_figures() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let state = AnalyticsAppState::new(store);
        let app = analytics_public_router(state.clone()).merge(analytics_admin_router(state));

        for ip in ["198.51.100.1", "198.51.100.1", "198.51.100.2"] {
            let (status, body) = send(&app, "POST", "/track", json!({ "page": "/" }), ip).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({ "success": true }));
        }

        let (_, body) = send(&app, "GET", "/total-views", Value::Null, "10.0.0.1").await;
        assert_eq!(body, json!({ "total": 3 }));
        let (_, body) = send(&app, "GET", "/today-views", Value::Null, "10.0.0.1").await;
        assert_eq!(body, json!({ "today": 3 }));
        let (_, body) = send(&app, "GET", "/unique-visitors", Value::Null, "10.0.0.1").await;
        assert_eq!(body, json!({ "unique": 2 }));

        let (_, body) = send(&app, "GET", "/daily-stats", Value::Null, "10.0.0.1").await;
        let days = body.as_array().unwrap();
        assert_eq!(days.len(), 14);
        assert_eq!(days[13]["count"], 3);

        let (_, body) = send(&app, "GET", "/overview", Value::Null, "10.0.0.1").await;
        assert_eq!(body["totalViews"], 3);
        assert_eq!(body["uniqueVisitors"], 2);
    }

    #[tokio::test]
    async fn test_track_without_page() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path()).await.unwrap());
        let app = analytics_public_router(AnalyticsAppState::new(store));

        let (status, body) = send(&app, "POST", "/track", json!({}), "198.51.100.1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errorKey"], "validation_error");
    }
}
