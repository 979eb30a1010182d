//! Launcher-side signal suppression while the engine runs.
//!
//! Terminal signals reach the whole foreground process group, so the engine
//! sees them directly. The launcher catches and discards its own copy and
//! keeps waiting for the engine to exit.
//!
//! Handlers are installed (not `SIG_IGN`), so the engine starts with default
//! dispositions after exec.

use std::io;

use tokio::task::JoinHandle;
use tracing::debug;

/// Holds the launcher's signal handlers. Dropping it stops the listener task;
/// the handlers stay registered for the life of the process.
#[derive(Debug)]
pub struct SignalSuppressor {
    task: JoinHandle<()>,
}

impl SignalSuppressor {
    /// Register handlers and start discarding signals. Requires a tokio runtime.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut interrupt = signal(SignalKind::interrupt())?;
        let mut hangup = signal(SignalKind::hangup())?;
        let mut quit = signal(SignalKind::quit())?;
        let mut terminate = signal(SignalKind::terminate())?;

        let task = tokio::spawn(async move {
            loop {
                let name = tokio::select! {
                    Some(()) = interrupt.recv() => "SIGINT",
                    Some(()) = hangup.recv() => "SIGHUP",
                    Some(()) = quit.recv() => "SIGQUIT",
                    Some(()) = terminate.recv() => "SIGTERM",
                    else => break,
                };
                debug!(
                    signal = name,
                    "Launcher received signal; ignoring, engine controls shutdown"
                );
            }
        });

        Ok(Self { task })
    }

    /// Register handlers and start discarding signals. Requires a tokio runtime.
    #[cfg(not(unix))]
    pub fn install() -> io::Result<Self> {
        let task = tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                debug!("Launcher received Ctrl-C; ignoring, engine controls shutdown");
            }
        });

        Ok(Self { task })
    }
}

impl Drop for SignalSuppressor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
