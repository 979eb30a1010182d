//! OS-facing adapters for the waterslide launcher.
//!
//! This crate implements the side-effecting pieces the core keeps abstract:
//! hostname resolution through the system resolver and supervision of the
//! engine child process.

#![deny(unsafe_code)]

pub mod process;
pub mod resolver;

pub use process::{
    EngineProcess, EngineState, ExitOutcome, OutputSink, SignalSuppressor, Supervisor, signal_name,
};
pub use resolver::{DEFAULT_RESOLVE_TIMEOUT, SystemResolver};
