//! Client key derivation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// A key that identifies the client a rate limit decision applies to.
///
/// Keys are derived from the connection's source address only. Forwarded
/// headers are never trusted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    /// Create a key from an arbitrary identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Create a key from a client IP address.
    pub fn from_ip(ip: IpAddr) -> Self {
        Self(ip.to_string())
    }

    /// Create a key from the peer address of a connection, if known.
    ///
    /// A missing address maps to `0.0.0.0`, so every such request shares
    /// one bucket.
    pub fn from_peer(peer: Option<SocketAddr>) -> Self {
        let ip = peer
            .map(|addr| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        Self::from_ip(ip)
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<IpAddr> for ClientKey {
    fn from(ip: IpAddr) -> Self {
        Self::from_ip(ip)
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
