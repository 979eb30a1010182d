//! Monitor gateway lifecycle: bind, serve in the background, stop on drop.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use waterslide_core::MonitorConfig;

use crate::error::MonitorBindError;
use crate::routes::create_monitor_router;

/// Gateway settings taken from the `monitor` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Port the UI is served on.
    pub ui_port: u16,
    /// Engine stats websocket port reported to the UI.
    pub ws_port: u16,
    /// Directory holding the monitor UI build.
    pub static_dir: PathBuf,
}

impl GatewayConfig {
    /// Gateway settings for a monitor block, or `None` when no UI port is set.
    pub fn from_monitor(monitor: &MonitorConfig, static_dir: impl Into<PathBuf>) -> Option<Self> {
        monitor.ui_port.map(|ui_port| Self {
            ui_port,
            ws_port: monitor.ws_port,
            static_dir: static_dir.into(),
        })
    }
}

/// A bound but not yet serving monitor listener.
#[derive(Debug)]
pub struct MonitorGateway {
    listener: TcpListener,
    config: GatewayConfig,
}

impl MonitorGateway {
    /// Bind `0.0.0.0:<ui_port>`.
    pub async fn bind(config: GatewayConfig) -> Result<Self, MonitorBindError> {
        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.ui_port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| MonitorBindError {
                port: config.ui_port,
                source,
            })?;

        if !config.static_dir.is_dir() {
            warn!(
                dir = %config.static_dir.display(),
                "Monitor asset directory not found; only {} will answer",
                crate::routes::WS_PORT_PATH
            );
        }

        Ok(Self { listener, config })
    }

    /// Address actually bound; differs from the configured one when port 0 is used.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Start serving in a background task. Must be called inside a tokio runtime.
    pub fn serve(self) -> MonitorHandle {
        let addr = self
            .listener
            .local_addr()
            .unwrap_or_else(|_| SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.config.ui_port)));
        let app = create_monitor_router(self.config.ws_port, &self.config.static_dir);

        info!(
            "Monitor UI listening on http://{} (stats websocket on port {})",
            addr, self.config.ws_port
        );
        debug!(dir = %self.config.static_dir.display(), "Serving monitor assets");

        let listener = self.listener;
        let task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                warn!(error = %e, "Monitor gateway stopped");
            }
        });

        MonitorHandle { addr, task }
    }
}

/// A serving gateway. Dropping it stops the server and closes the socket.
#[derive(Debug)]
pub struct MonitorHandle {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl MonitorHandle {
    pub const fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop serving and wait for the socket to close.
    pub async fn shutdown(mut self) {
        self.task.abort();
        // Cancellation is the expected result here.
        let _ = (&mut self.task).await;
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_ui_port_means_no_gateway() {
        let monitor = MonitorConfig {
            ws_port: 7681,
            ui_port: None,
        };
        assert_eq!(GatewayConfig::from_monitor(&monitor, "/srv/monitor"), None);
    }

    #[test]
    fn ui_port_carries_ws_port() {
        let monitor = MonitorConfig {
            ws_port: 7681,
            ui_port: Some(8080),
        };
        let config = GatewayConfig::from_monitor(&monitor, "/srv/monitor").unwrap();
        assert_eq!(config.ui_port, 8080);
        assert_eq!(config.ws_port, 7681);
        assert_eq!(config.static_dir, PathBuf::from("/srv/monitor"));
    }
}
