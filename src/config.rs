//! Service configuration.

use core::net::{Ipv4Addr, SocketAddr};

/// Environment variable overriding the HTTP bind address.
pub const BIND_ENV: &str = "RECEIPT_POINTS_BIND";

/// Port the service listens on when nothing else is configured.
pub const DEFAULT_PORT: u16 = 8080;

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_address: SocketAddr,
}

impl ServerConfig {
    /// Creates a configuration listening on `bind_address`.
    #[inline]
    #[must_use]
    pub const fn new(bind_address: SocketAddr) -> Self {
        Self { bind_address }
    }
}

impl Default for ServerConfig {
    /// Listens on all interfaces, port [`DEFAULT_PORT`].
    #[inline]
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn new_keeps_address() {
        let addr: SocketAddr = "127.0.0.1:9000".parse().unwrap();
        assert_eq!(ServerConfig::new(addr).bind_address, addr);
    }
}
