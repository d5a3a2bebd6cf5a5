//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

/// Where the client IP is taken from
///
/// Read from request extensions by the [`ClientInfo`] extractor; absent
/// means [`ClientIpSource::Direct`]. Only deployments behind a reverse
/// proxy that sets X-Forwarded-For should insert `ForwardedFor`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClientIpSource {
    /// Peer address of the TCP connection; X-Forwarded-For is ignored
    #[default]
    Direct,
    /// Entry appended to X-Forwarded-For by the trusted proxy
    ForwardedFor,
}

/// Request metadata recorded on audit entries and page views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    /// Client IP address
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

impl ClientInfo {
    /// Build from request headers and the direct connection address
    pub fn from_headers(
        headers: &HeaderMap,
        direct_ip: Option<IpAddr>,
        source: ClientIpSource,
    ) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip, source),
            user_agent: header_string(headers, header::USER_AGENT.as_str()),
            referer: header_string(headers, header::REFERER.as_str()),
        }
    }

    /// Get IP as string (for storage)
    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

/// Works with or without `into_make_service_with_connect_info`
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        let source = parts
            .extensions
            .get::<ClientIpSource>()
            .copied()
            .unwrap_or_default();
        Ok(Self::from_headers(&parts.headers, direct_ip, source))
    }
}

/// Extract client IP address
///
/// With [`ClientIpSource::Direct`] the connection address is used as is.
/// Behind a trusted proxy the last X-Forwarded-For entry is used, since
/// earlier entries are whatever the client chose to send. Falls back to
/// the connection address when the header is missing or unparseable.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    source: ClientIpSource,
) -> Option<IpAddr> {
    if source == ClientIpSource::ForwardedFor {
        let forwarded = headers
            .get_all("x-forwarded-for")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .last()
            .and_then(|last| last.trim().parse::<IpAddr>().ok());
        if forwarded.is_some() {
            return forwarded;
        }
    }
    direct_ip
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_client_info_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 Test Browser"),
        );
        headers.insert(header::REFERER, HeaderValue::from_static("https://google.com/"));

        let direct: IpAddr = "127.0.0.1".parse().unwrap();
        let info = ClientInfo::from_headers(&headers, Some(direct), ClientIpSource::Direct);

        assert_eq!(info.ip, Some(direct));
        assert_eq!(info.user_agent.as_deref(), Some("Mozilla/5.0 Test Browser"));
        assert_eq!(info.referer.as_deref(), Some("https://google.com/"));
        assert_eq!(info.ip_string().as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_client_info_missing_headers() {
        let info = ClientInfo::from_headers(&HeaderMap::new(), None, ClientIpSource::default());
        assert_eq!(info, ClientInfo::default());
    }

    fn forwarded(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_forwarded_for_ignored_without_proxy() {
        let headers = forwarded("192.168.1.1");
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        assert_eq!(
            extract_client_ip(&headers, Some(direct), ClientIpSource::Direct),
            Some(direct)
        );
        assert_eq!(extract_client_ip(&headers, None, ClientIpSource::Direct), None);
    }

    #[test]
    fn test_forwarded_for_uses_proxy_entry() {
        // The client sent "192.168.1.1"; the proxy appended the peer it saw.
        let headers = forwarded("192.168.1.1, 198.51.100.7");

        let ip = extract_client_ip(&headers, None, ClientIpSource::ForwardedFor);
        assert_eq!(ip, Some("198.51.100.7".parse().unwrap()));
    }

    #[test]
    fn test_extract_client_ip_bad_xff_falls_back() {
        let headers = forwarded("unknown");
        let direct: IpAddr = "10.1.2.3".parse().unwrap();

        assert_eq!(
            extract_client_ip(&headers, Some(direct), ClientIpSource::ForwardedFor),
            Some(direct)
        );
    }

    #[tokio::test]
    async fn test_extractor_reads_connection_and_source() {
        let peer: SocketAddr = "10.0.0.9:51234".parse().unwrap();
        let (mut parts, ()) = axum::http::Request::builder()
            .header("x-forwarded-for", "203.0.113.1")
            .extension(ConnectInfo(peer))
            .body(())
            .unwrap()
            .into_parts();

        let info = ClientInfo::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(info.ip, Some(peer.ip()));

        parts.extensions.insert(ClientIpSource::ForwardedFor);
        let info = ClientInfo::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(info.ip, Some("203.0.113.1".parse().unwrap()));
    }
}
