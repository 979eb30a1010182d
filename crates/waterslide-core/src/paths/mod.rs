//! Resource path resolution.
//!
//! The launcher ships next to two resource directories:
//!
//! ```text
//! <resource root>/
//!   bin/waterslide           launcher
//!   bin/waterslide-<abi>     engine builds
//!   monitor/                 monitor UI bundle
//! ```
//!
//! Every function takes an environment lookup so callers (and tests) decide
//! where overrides come from.

mod error;

pub use error::PathError;

use std::env;
use std::path::PathBuf;

/// Overrides the resource root.
pub const RESOURCE_DIR_ENV: &str = "WATERSLIDE_RESOURCE_DIR";
/// Overrides the engine binary directory.
pub const BIN_DIR_ENV: &str = "WATERSLIDE_BIN_DIR";
/// Overrides the monitor UI bundle directory.
pub const MONITOR_DIR_ENV: &str = "WATERSLIDE_MONITOR_DIR";

/// Detect if we are running from the local repository.
///
/// Debug builds always use the repository they were built from.
#[allow(clippy::unnecessary_wraps)] // Option is needed for release builds
fn detect_local_repo() -> Option<PathBuf> {
    #[cfg(debug_assertions)]
    {
        Some(PathBuf::from(env!("WATERSLIDE_REPO_ROOT")))
    }

    #[cfg(not(debug_assertions))]
    {
        None
    }
}

fn override_dir(
    lookup: &dyn Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<PathBuf>, PathError> {
    match lookup(var) {
        Some(value) if value.trim().is_empty() => Err(PathError::EmptyOverride { var }),
        Some(value) => Ok(Some(PathBuf::from(value.trim()))),
        None => Ok(None),
    }
}

/// Get the root directory for launcher resources.
///
/// Resolution order:
/// 1. `WATERSLIDE_RESOURCE_DIR`
/// 2. Local repository (debug builds)
/// 3. Parent of the directory holding the launcher executable
pub fn resource_root(lookup: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir(lookup, RESOURCE_DIR_ENV)? {
        return Ok(dir);
    }

    if let Some(repo) = detect_local_repo() {
        return Ok(repo);
    }

    let exe = env::current_exe().map_err(|e| PathError::CurrentExe(e.to_string()))?;
    exe.parent()
        .and_then(|bin| bin.parent())
        .map(std::path::Path::to_path_buf)
        .ok_or(PathError::NoParent(exe))
}

/// Directory holding the engine binaries.
pub fn engine_bin_dir(lookup: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir(lookup, BIN_DIR_ENV)? {
        return Ok(dir);
    }
    Ok(resource_root(lookup)?.join("bin"))
}

/// Directory holding the monitor UI bundle.
pub fn monitor_dir(lookup: &dyn Fn(&str) -> Option<String>) -> Result<PathBuf, PathError> {
    if let Some(dir) = override_dir(lookup, MONITOR_DIR_ENV)? {
        return Ok(dir);
    }
    Ok(resource_root(lookup)?.join("monitor"))
}

/// Lookup backed by the process environment.
pub fn process_env(var: &str) -> Option<String> {
    env::var(var).ok()
}
