//! Global request limiter
//!
//! Every request is counted against its client IP in a sliding window,
//! separate from the lead submission throttle.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::ClientInfo;
use platform::rate_limit::{
    RateLimitConfig, RateLimitResult, RateLimitStore, SlidingWindowStore, now_ms,
};

/// Middleware state
#[derive(Clone)]
pub struct RequestLimiter {
    pub store: Arc<SlidingWindowStore>,
    pub config: RateLimitConfig,
}

impl RequestLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            store: Arc::new(SlidingWindowStore::default()),
            config,
        }
    }
}

/// Count the request and reject with 429 once the client's window is full
pub async fn limit_requests(
    State(limiter): State<RequestLimiter>,
    client: ClientInfo,
    req: Request<Body>,
    next: Next,
) -> Response {
    let key = client.ip_string().unwrap_or_else(|| "unknown".to_string());

    let result = match limiter.store.check_and_increment(&key, &limiter.config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(error = %e, "Request limiter failed, letting request through");
            return next.run(req).await;
        }
    };

    if !result.allowed {
        tracing::warn!(client_ip = %key, path = %req.uri().path(), "Request rate limit exceeded");
        let mut response = AppError::too_many_requests("Too many requests, please try again later")
            .with_error_key("too_many_requests")
            .into_response();
        let retry_after_secs = ((result.reset_at_ms - now_ms()).max(0) + 999) / 1000;
        insert_header(response.headers_mut(), "retry-after", retry_after_secs);
        insert_limit_headers(response.headers_mut(), &limiter.config, &result);
        return response;
    }

    let mut response = next.run(req).await;
    insert_limit_headers(response.headers_mut(), &limiter.config, &result);
    response
}

fn insert_limit_headers(headers: &mut HeaderMap, config: &RateLimitConfig, result: &RateLimitResult) {
    insert_header(headers, "x-ratelimit-limit", config.max_requests);
    insert_header(headers, "x-ratelimit-remaining", result.remaining);
    insert_header(headers, "x-ratelimit-reset", result.reset_at_ms.div_euclid(1000));
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: impl ToString) {
    if let Ok(value) = HeaderValue::from_str(&value.to_string()) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::ConnectInfo;
    use axum::http::{StatusCode, header};
    use axum::middleware::from_fn_with_state;
    use axum::routing::get;
    use std::net::SocketAddr;
    use tower::ServiceExt;

    fn app(max_requests: u32) -> Router {
        let limiter = RequestLimiter::new(RateLimitConfig::new(max_requests, 60));
        Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(from_fn_with_state(limiter, limit_requests))
    }

    fn request(ip: &str) -> Request<Body> {
        let peer = SocketAddr::new(ip.parse().unwrap(), 50000);
        Request::builder()
            .uri("/")
            .extension(ConnectInfo(peer))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_headers_and_rejection() {
        let app = app(2);

        let first = app.clone().oneshot(request("192.0.2.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(first.headers()["x-ratelimit-limit"], "2");
        assert_eq!(first.headers()["x-ratelimit-remaining"], "1");

        let second = app.clone().oneshot(request("192.0.2.1")).await.unwrap();
        assert_eq!(second.headers()["x-ratelimit-remaining"], "0");

        let third = app.clone().oneshot(request("192.0.2.1")).await.unwrap();
        assert_eq!(third.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(third.headers().contains_key(header::RETRY_AFTER));

        // Other clients have their own window
        let other = app.oneshot(request("192.0.2.2")).await.unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_forwarded_for_is_ignored_by_default() {
        let app = app(1);
        let spoofed = |forwarded_for: &str| {
            let mut req = request("192.0.2.1");
            req.headers_mut()
                .insert("x-forwarded-for", forwarded_for.parse().unwrap());
            req
        };

        let first = app.clone().oneshot(spoofed("198.51.100.1")).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = app.oneshot(spoofed("198.51.100.2")).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
