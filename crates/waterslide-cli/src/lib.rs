//! The `waterslide` launcher.
//!
//! Turns an operator's JSON configuration (or a ready-made payload) into a
//! running engine process, optionally serving the monitor UI alongside it.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod parser;

// Re-export primary types for convenient access
pub use bootstrap::{LauncherConfig, LauncherContext, bootstrap};
pub use error::CliError;
pub use parser::{Cli, ConfigSource, Invocation, USAGE};
