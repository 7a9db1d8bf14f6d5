//! Client identification utilities
//!
//! Derives the identity used for per-client admission control from
//! proxy headers or the peer address.

use axum::http::HeaderMap;
use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

/// Identity of a request's origin
///
/// Never empty. Requests whose origin cannot be determined share the
/// [`ClientKey::unidentified`] bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(Arc<str>);

impl ClientKey {
    const UNIDENTIFIED: &'static str = "unidentified";

    /// Normalize a raw key; blank input yields `None`
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(Arc::from(trimmed)))
        }
    }

    /// Shared bucket for requests without a usable origin
    pub fn unidentified() -> Self {
        Self(Arc::from(Self::UNIDENTIFIED))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IpAddr> for ClientKey {
    fn from(ip: IpAddr) -> Self {
        Self(Arc::from(ip.to_string()))
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract client IP address from headers
///
/// Checks `X-Forwarded-For` (first entry) and then `X-Real-IP`, for
/// reverse proxy setups, before falling back to the direct connection IP.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Direct connection IP address
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return Some(ip);
        }
    }
    direct_ip
}

/// Admission key for a request
pub fn client_key(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> ClientKey {
    extract_client_ip(headers, direct_ip)
        .map(ClientKey::from)
        .unwrap_or_else(ClientKey::unidentified)
}
