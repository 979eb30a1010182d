//! Path-related error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating launcher resources.
#[derive(Debug, Error)]
pub enum PathError {
    /// An override variable was set to an empty string.
    #[error("{var} is set but empty")]
    EmptyOverride { var: &'static str },

    /// The launcher executable could not be located.
    #[error("Cannot determine launcher executable location: {0}")]
    CurrentExe(String),

    /// The executable lives at a path with no usable parent directory.
    #[error("Launcher executable {0} has no parent directory")]
    NoParent(PathBuf),
}
