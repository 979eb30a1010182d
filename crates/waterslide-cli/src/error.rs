//! CLI error type and exit-code mapping.

use thiserror::Error;
use waterslide_core::LaunchError;

/// Errors surfaced by the `waterslide` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Missing or invalid command-line arguments.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// A launch step failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl CliError {
    /// Map error to the process exit code.
    ///
    /// Data and environment failures use sysexits.h codes; usage and
    /// platform errors exit 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) => 1,
            Self::Launch(err) => match err {
                LaunchError::UnsupportedPlatform { .. } => 1,
                LaunchError::Schema(_) | LaunchError::Decode(_) => 65, // EX_DATAERR
                LaunchError::ConfigRead { .. } => 66,                  // EX_NOINPUT
                LaunchError::Resolution { .. } => 68,                  // EX_NOHOST
                LaunchError::Spawn { .. } | LaunchError::Io(_) => 71,  // EX_OSERR
            },
        }
    }
}

impl From<clap::Error> for CliError {
    /// Keep only clap's one-line reason; the launcher prints its own usage.
    fn from(err: clap::Error) -> Self {
        let rendered = err.to_string();
        let reason = rendered
            .lines()
            .next()
            .unwrap_or_default()
            .trim_start_matches("error: ")
            .trim();
        if reason.is_empty() {
            Self::Usage(err.kind().to_string())
        } else {
            Self::Usage(reason.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn exit_codes() {
        let cases = [
            (CliError::Usage("no source".into()), 1),
            (
                LaunchError::UnsupportedPlatform {
                    os: "freebsd".into(),
                    arch: "x86_64".into(),
                }
                .into(),
                1,
            ),
            (LaunchError::Schema("mode".into()).into(), 65),
            (LaunchError::Decode("bad".into()).into(), 65),
            (
                LaunchError::ConfigRead {
                    path: "missing.json".into(),
                    source: io::ErrorKind::NotFound.into(),
                }
                .into(),
                66,
            ),
            (
                LaunchError::Resolution {
                    host: "nowhere.invalid".into(),
                    reason: "no IPv4 (A) record".into(),
                }
                .into(),
                68,
            ),
            (
                LaunchError::Spawn {
                    path: "bin/waterslide-linux-x64".into(),
                    source: io::ErrorKind::PermissionDenied.into(),
                }
                .into(),
                71,
            ),
            (LaunchError::Io(io::Error::other("wait failed")).into(), 71),
        ];

        for (err, code) in cases {
            assert_eq!(err.exit_code(), code, "{err}");
        }
    }

    #[test]
    fn parse_failures_become_usage_errors() {
        use crate::Cli;
        use clap::Parser;

        let err: CliError = Cli::try_parse_from(["waterslide", "-x", "foo"])
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), 1);
        let message = err.to_string();
        assert!(message.starts_with("Invalid arguments: "), "{message}");
        assert!(message.contains("-x"), "{message}");
        assert!(!message.contains('\n'), "{message}");
    }

    #[test]
    fn missing_source_is_a_usage_error() {
        use crate::Cli;
        use clap::Parser;

        let err: CliError = Cli::try_parse_from(["waterslide"]).unwrap_err().into();
        assert!(matches!(err, CliError::Usage(ref m) if !m.is_empty()), "{err}");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn launch_errors_keep_their_message() {
        let err = CliError::from(LaunchError::Resolution {
            host: "studio.local".into(),
            reason: "lookup timed out after 10s".into(),
        });
        assert!(err.to_string().contains("studio.local"));
    }
}
