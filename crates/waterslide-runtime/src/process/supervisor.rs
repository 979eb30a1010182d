//! Single-shot engine supervision: spawn, forward, wait, mirror.

use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use waterslide_core::{LaunchError, WirePayload};

use super::signals::SignalSuppressor;
use super::stream::{OutputSink, spawn_stream_forwarder};

/// How long `wait` lets forwarders drain after the engine exits. A grandchild
/// that inherited the pipes can keep them open indefinitely.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lifecycle of the single engine process.
///
/// A [`Supervisor`] is always `NotStarted` and an [`EngineProcess`] is
/// `Running` until `wait` moves it to a terminal state. `Starting` covers the
/// synchronous spawn inside [`Supervisor::launch`] and is only visible in its
/// log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    NotStarted,
    Starting,
    Running,
    Exited(i32),
    Terminated(i32),
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Starting => write!(f, "starting"),
            Self::Running => write!(f, "running"),
            Self::Exited(code) => write!(f, "exited({code})"),
            Self::Terminated(signal) => write!(f, "terminated({})", signal_name(*signal)),
        }
    }
}

/// How the engine ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal exit with a status code.
    Exited(i32),
    /// Killed by the given signal number.
    Terminated(i32),
}

impl ExitOutcome {
    /// Classify a raw exit status.
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Terminated(signal);
            }
        }

        // No code and no signal; treat as a generic failure.
        Self::Exited(1)
    }

    /// Code the launcher should exit with: the engine's own code, or 0 when
    /// the engine was closed by a signal.
    pub const fn launcher_exit_code(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Terminated(_) => 0,
        }
    }
}

impl From<ExitOutcome> for EngineState {
    fn from(outcome: ExitOutcome) -> Self {
        match outcome {
            ExitOutcome::Exited(code) => Self::Exited(code),
            ExitOutcome::Terminated(signal) => Self::Terminated(signal),
        }
    }
}

/// Human-readable signal name, e.g. `SIGTERM`.
pub fn signal_name(signal: i32) -> String {
    #[cfg(unix)]
    {
        nix::sys::signal::Signal::try_from(signal)
            .map_or_else(|_| format!("signal {signal}"), |s| s.as_str().to_string())
    }

    #[cfg(not(unix))]
    {
        format!("signal {signal}")
    }
}

/// Signals that ask a process to stop, as opposed to crash signals.
fn is_shutdown_signal(signal: i32) -> bool {
    #[cfg(unix)]
    {
        use nix::sys::signal::Signal;
        matches!(
            Signal::try_from(signal),
            Ok(Signal::SIGINT
                | Signal::SIGTERM
                | Signal::SIGHUP
                | Signal::SIGQUIT
                | Signal::SIGKILL)
        )
    }

    #[cfg(not(unix))]
    {
        let _ = signal;
        true
    }
}

/// Launches the engine once and wires its output to the launcher's streams.
pub struct Supervisor {
    state: EngineState,
    stdout: OutputSink,
    stderr: OutputSink,
}

impl fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Supervisor")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

impl Supervisor {
    /// Forward engine output to the launcher's own stdout and stderr.
    pub fn new() -> Self {
        Self::with_output(Box::new(tokio::io::stdout()), Box::new(tokio::io::stderr()))
    }

    /// Forward engine output to arbitrary writers.
    pub fn with_output(stdout: OutputSink, stderr: OutputSink) -> Self {
        Self {
            state: EngineState::NotStarted,
            stdout,
            stderr,
        }
    }

    /// Always `NotStarted`; `launch` consumes the supervisor.
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Spawn `binary` with `payload` as its only argument.
    ///
    /// Must be called inside a tokio runtime. Signal suppression starts once
    /// the child exists and lasts until the returned handle is dropped.
    pub fn launch(
        self,
        binary: &Path,
        payload: &WirePayload,
    ) -> Result<EngineProcess, LaunchError> {
        info!(
            binary = %binary.display(),
            state = %EngineState::Starting,
            "Launching engine"
        );

        let mut child = Command::new(binary)
            .arg(payload)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                path: binary.to_path_buf(),
                source,
            })?;

        let mut forwarders = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            forwarders.push(spawn_stream_forwarder(stdout, self.stdout, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            forwarders.push(spawn_stream_forwarder(stderr, self.stderr, "stderr"));
        }

        let signals = match SignalSuppressor::install() {
            Ok(suppressor) => Some(suppressor),
            Err(e) => {
                warn!(
                    error = %e,
                    "Failed to install signal handlers; launcher signals keep default behaviour"
                );
                None
            }
        };

        debug!(pid = ?child.id(), "Engine running");
        Ok(EngineProcess {
            child,
            forwarders,
            _signals: signals,
            state: EngineState::Running,
            outcome: None,
        })
    }
}

/// The running engine. There is exactly one per launcher invocation.
#[derive(Debug)]
pub struct EngineProcess {
    child: Child,
    forwarders: Vec<JoinHandle<u64>>,
    _signals: Option<SignalSuppressor>,
    state: EngineState,
    outcome: Option<ExitOutcome>,
}

impl EngineProcess {
    /// OS process id while the engine has not been reaped.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Wait for the engine to exit and for its output to be flushed.
    ///
    /// Calling again after completion returns the cached outcome.
    pub async fn wait(&mut self) -> Result<ExitOutcome, LaunchError> {
        if let Some(outcome) = self.outcome {
            return Ok(outcome);
        }

        let status = self.child.wait().await?;
        let outcome = ExitOutcome::from_status(status);
        self.drain_forwarders().await;

        match outcome {
            ExitOutcome::Exited(code) => info!(code, "Engine exited"),
            ExitOutcome::Terminated(signal) => {
                let name = signal_name(signal);
                info!(signal = %name, "Engine closed by {}", name);
                if !is_shutdown_signal(signal) {
                    warn!(
                        signal = %name,
                        "Engine died from a crash signal; launcher still exits 0"
                    );
                }
            }
        }

        self.state = outcome.into();
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    async fn drain_forwarders(&mut self) {
        for handle in self.forwarders.drain(..) {
            match timeout(DRAIN_TIMEOUT, handle).await {
                Ok(Ok(bytes)) => debug!(bytes, "Forwarder drained"),
                Ok(Err(e)) => debug!(error = %e, "Forwarder task failed"),
                Err(_) => warn!("Engine output still open after exit; detaching forwarder"),
            }
        }
    }
}
