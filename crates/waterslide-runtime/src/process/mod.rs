//! Engine process supervision.
//!
//! # Structure
//!
//! - `Supervisor` / `EngineProcess` - spawn the engine once and wait for it
//! - `SignalSuppressor` - keeps the launcher alive while the engine decides shutdown
//! - stream forwarding - byte-exact copy of engine stdout/stderr

mod signals;
mod stream;
mod supervisor;

pub use signals::SignalSuppressor;
pub use stream::OutputSink;
pub use supervisor::{EngineProcess, EngineState, ExitOutcome, Supervisor, signal_name};
