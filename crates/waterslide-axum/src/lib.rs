//! Monitor gateway for the waterslide launcher.
//!
//! Serves the monitor UI's static files and tells the UI which port carries
//! the engine's stats websocket. The gateway lives only as long as the
//! launcher and never talks to the engine itself.

#![deny(unsafe_code)]

pub mod error;
pub mod gateway;
pub mod routes;

pub use error::MonitorBindError;
pub use gateway::{GatewayConfig, MonitorGateway, MonitorHandle};
pub use routes::{WS_PORT_PATH, create_monitor_router};
