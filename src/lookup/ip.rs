//! Client IP resolution strategies.
//!
//! Two strategies exist: `Probe` asks a public IP-echo service for the
//! server's outbound address (the behavior of the original deployment),
//! `Header` trusts the `X-Forwarded-For` header set by a reverse proxy
//! and falls back to the transport peer address. The strategy is a
//! deliberate configuration choice, not a per-request decision.

use std::net::SocketAddr;

use axum::http::HeaderMap;
use serde::Deserialize;

/// Forwarding header consulted by the header strategy.
pub const FORWARDED_HEADER: &str = "x-forwarded-for";

/// Where the client's public IP comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpSource {
    /// Ask an external IP-echo service.
    #[default]
    Probe,
    /// Read the forwarding header, falling back to the peer address.
    Header,
}

/// Resolve the client IP from request headers.
///
/// Takes the first comma-separated entry of `X-Forwarded-For` when
/// present and non-empty, otherwise the peer address of the underlying
/// connection. Returns `None` when neither is available.
pub fn from_forwarded_headers(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get(FORWARDED_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|entry| !entry.is_empty());

    match forwarded {
        Some(ip) => Some(ip.to_string()),
        None => peer.map(|addr| addr.ip().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("10.1.2.3:40000".parse().expect("valid socket addr"))
    }

    #[test]
    fn takes_first_forwarded_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            FORWARDED_HEADER,
            HeaderValue::from_static("9.9.9.9, 10.0.0.1, 172.16.0.1"),
        );

        assert_eq!(
            from_forwarded_headers(&headers, peer()),
            Some("9.9.9.9".to_string())
        );
    }

    #[test]
    fn trims_whitespace_around_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_HEADER, HeaderValue::from_static(" 9.9.9.9 ,x"));

        assert_eq!(
            from_forwarded_headers(&headers, None),
            Some("9.9.9.9".to_string())
        );
    }

    #[test]
    fn falls_back_to_peer_address() {
        let headers = HeaderMap::new();

        assert_eq!(
            from_forwarded_headers(&headers, peer()),
            Some("10.1.2.3".to_string())
        );
    }

    #[test]
    fn empty_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(FORWARDED_HEADER, HeaderValue::from_static(""));

        assert_eq!(
            from_forwarded_headers(&headers, peer()),
            Some("10.1.2.3".to_string())
        );
    }

    #[test]
    fn returns_none_without_header_or_peer() {
        let headers = HeaderMap::new();

        assert_eq!(from_forwarded_headers(&headers, None), None);
    }

    #[test]
    fn ip_source_deserializes_lowercase() {
        let source: IpSource = serde_json::from_str("\"header\"").expect("valid variant");
        assert_eq!(source, IpSource::Header);
    }
}
