//! System DNS implementation of [`AddressResolver`].

use async_trait::async_trait;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;
use waterslide_core::{AddressResolver, LaunchError};

/// Default lookup timeout.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves hostnames through the operating system resolver, IPv4 only.
#[derive(Debug, Clone)]
pub struct SystemResolver {
    timeout: Duration,
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLVE_TIMEOUT)
    }
}

impl SystemResolver {
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl AddressResolver for SystemResolver {
    async fn resolve(&self, host: &str) -> Result<[u8; 4], LaunchError> {
        // Dotted-quad text needs no lookup.
        if let Ok(addr) = host.parse::<Ipv4Addr>() {
            return Ok(addr.octets());
        }

        let failure = |reason: String| LaunchError::Resolution {
            host: host.to_string(),
            reason,
        };

        debug!(host = %host, timeout_secs = self.timeout.as_secs(), "Resolving host");
        let addrs = timeout(self.timeout, tokio::net::lookup_host((host, 0)))
            .await
            .map_err(|_| {
                failure(format!(
                    "lookup timed out after {}s",
                    self.timeout.as_secs_f32()
                ))
            })?
            .map_err(|e| failure(e.to_string()))?;

        addrs
            .into_iter()
            .find_map(|addr| match addr {
                SocketAddr::V4(v4) => Some(v4.ip().octets()),
                SocketAddr::V6(_) => None,
            })
            .ok_or_else(|| failure("no IPv4 (A) record".to_string()))
    }
}
