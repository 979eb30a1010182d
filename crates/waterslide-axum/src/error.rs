//! Gateway error types.

use std::io;
use thiserror::Error;

/// The monitor listener could not be opened.
///
/// Never fatal for a launch: the orchestrator logs it and starts the engine
/// without a monitor.
#[derive(Debug, Error)]
#[error("Cannot bind monitor UI on port {port}: {source}")]
pub struct MonitorBindError {
    pub port: u16,
    #[source]
    pub source: io::Error,
}
