//! Address resolver port.
//!
//! The engine only understands IPv4 octets, so a hostname in
//! `discovery.serverAddr` is resolved exactly once, before encoding. There is
//! no retry and no cache: the engine owns reconnection, and a launch performs
//! a single lookup at most.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::config::{InitConfig, ServerAddr};
use crate::error::LaunchError;

/// Resolves a hostname to one IPv4 address.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolve `host` to dotted-quad octets.
    ///
    /// Fails with [`LaunchError::Resolution`] when no A record exists or the
    /// lookup times out.
    async fn resolve(&self, host: &str) -> Result<[u8; 4], LaunchError>;
}

/// Fold a resolved address into the document.
///
/// Returns `true` if a lookup was performed. Documents already holding octets
/// are left untouched and the resolver is not called.
pub async fn resolve_server_addr(
    config: &mut InitConfig,
    resolver: &dyn AddressResolver,
) -> Result<bool, LaunchError> {
    let ServerAddr::Host(host) = &config.discovery.server_addr else {
        return Ok(false);
    };

    let octets = resolver.resolve(host).await?;
    let resolved = ServerAddr::Octets(octets);
    info!(host = %host, addr = %resolved, "Resolved discovery server");
    config.discovery.server_addr = resolved;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::SAMPLE;

    fn config_with(addr: ServerAddr) -> InitConfig {
        let mut config = InitConfig::from_json_str(SAMPLE).unwrap();
        config.discovery.server_addr = addr;
        config
    }

    #[tokio::test]
    async fn hostname_is_resolved_once() {
        let mut resolver = MockAddressResolver::new();
        resolver
            .expect_resolve()
            .withf(|host: &str| host == "example.com")
            .times(1)
            .returning(|_| Ok([93, 184, 216, 34]));

        let mut config = config_with(ServerAddr::Host("example.com".to_string()));
        assert!(resolve_server_addr(&mut config, &resolver).await.unwrap());
        assert_eq!(
            config.discovery.server_addr,
            ServerAddr::Octets([93, 184, 216, 34])
        );

        // Second pass is a no-op; the mock would panic on a second call.
        assert!(!resolve_server_addr(&mut config, &resolver).await.unwrap());
    }

    #[tokio::test]
    async fn octets_skip_lookup() {
        let mut resolver = MockAddressResolver::new();
        resolver.expect_resolve().never();

        let mut config = config_with(ServerAddr::Octets([10, 0, 0, 2]));
        assert!(!resolve_server_addr(&mut config, &resolver).await.unwrap());
        assert_eq!(config.discovery.server_addr, ServerAddr::Octets([10, 0, 0, 2]));
    }

    #[tokio::test]
    async fn failure_leaves_document_unchanged() {
        let mut resolver = MockAddressResolver::new();
        resolver.expect_resolve().returning(|host| {
            Err(LaunchError::Resolution {
                host: host.to_string(),
                reason: "no IPv4 record".to_string(),
            })
        });

        let mut config = config_with(ServerAddr::Host("nowhere.invalid".to_string()));
        let err = resolve_server_addr(&mut config, &resolver).await.unwrap_err();
        assert!(err.to_string().contains("nowhere.invalid"));
        assert_eq!(
            config.discovery.server_addr,
            ServerAddr::Host("nowhere.invalid".to_string())
        );
    }
}
