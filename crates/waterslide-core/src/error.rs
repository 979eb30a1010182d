//! Launch error taxonomy.
//!
//! Every variant except [`LaunchError::Spawn`] is raised before the engine
//! process exists, so none of them leave a child or a listening socket behind.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a launcher invocation.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The configuration file could not be read.
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration document or the decoded payload does not fit the schema.
    #[error("Invalid configuration: {0}")]
    Schema(String),

    /// The wire payload is not valid base64.
    #[error("Malformed wire payload: {0}")]
    Decode(String),

    /// A symbolic server address could not be turned into an IPv4 address.
    #[error("Cannot resolve '{host}' to an IPv4 address: {reason}")]
    Resolution { host: String, reason: String },

    /// The host has no engine binary variant.
    #[error(
        "Unsupported platform: {os}-{arch}. No waterslide engine binary is built for this host."
    )]
    UnsupportedPlatform { os: String, arch: String },

    /// The engine binary could not be started.
    #[error("Failed to spawn engine binary {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// IO failure while supervising the engine.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LaunchError {
    /// Build a [`LaunchError::Schema`] naming the offending field.
    pub fn schema(field: &str, reason: impl std::fmt::Display) -> Self {
        Self::Schema(format!("{field}: {reason}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_platform_names_the_pair() {
        let err = LaunchError::UnsupportedPlatform {
            os: "freebsd".to_string(),
            arch: "riscv64".to_string(),
        };
        assert!(err.to_string().contains("freebsd-riscv64"));
    }

    #[test]
    fn schema_helper_prefixes_field() {
        let err = LaunchError::schema("discovery.serverPort", "must fit in 16 bits");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: discovery.serverPort: must fit in 16 bits"
        );
    }
}
