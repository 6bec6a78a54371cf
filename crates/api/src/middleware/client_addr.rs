//! Client address extraction.

use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;

/// Key used when no address can be determined.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// The address a request is attributed to.
///
/// Resolution order: first hop of `X-Forwarded-For`, then `X-Real-IP`, then
/// the socket peer (only present when served with connect info), then
/// [`UNKNOWN_CLIENT`]. Forwarding headers are trusted as-is, which assumes
/// the service runs behind a reverse proxy that sets them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(pub String);

impl ClientAddr {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_parts(parts: &Parts) -> Self {
        if let Some(first) = header(parts, "x-forwarded-for")
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
        {
            return Self(first.to_string());
        }
        if let Some(real_ip) = header(parts, "x-real-ip") {
            return Self(real_ip.to_string());
        }
        if let Some(ConnectInfo(peer)) = parts.extensions.get::<ConnectInfo<SocketAddr>>() {
            return Self(peer.ip().to_string());
        }
        Self(UNKNOWN_CLIENT.to_string())
    }
}

fn header<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ClientAddr {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}
