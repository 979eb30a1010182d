//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where concrete adapters are chosen:
//! - System DNS resolver (via waterslide-runtime)
//! - Host platform and the built-in binary table (via waterslide-core)
//! - Resource directories from environment overrides
//!
//! Handlers receive the composed [`LauncherContext`] and never read the
//! environment themselves.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use waterslide_core::{
    AddressResolver, Platform, PlatformTable, engine_bin_dir, monitor_dir, process_env,
};
use waterslide_runtime::{DEFAULT_RESOLVE_TIMEOUT, SystemResolver};

/// Overrides the DNS lookup timeout, in whole seconds.
pub const RESOLVE_TIMEOUT_ENV: &str = "WATERSLIDE_RESOLVE_TIMEOUT_SECS";

/// Launcher-level settings. These never reach the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    /// Directory holding the per-platform engine binaries.
    pub bin_dir: PathBuf,
    /// Directory holding the monitor UI build.
    pub monitor_dir: PathBuf,
    /// Timeout for resolving a symbolic discovery server address.
    pub resolve_timeout: Duration,
}

impl LauncherConfig {
    /// Create config from the process environment.
    pub fn with_defaults() -> Result<Self> {
        Self::from_lookup(&process_env)
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self> {
        let resolve_timeout = match lookup(RESOLVE_TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().with_context(|| {
                    format!("{RESOLVE_TIMEOUT_ENV} must be a whole number of seconds, got '{raw}'")
                })?;
                anyhow::ensure!(secs > 0, "{RESOLVE_TIMEOUT_ENV} must be at least 1");
                Duration::from_secs(secs)
            }
            None => DEFAULT_RESOLVE_TIMEOUT,
        };

        Ok(Self {
            bin_dir: engine_bin_dir(lookup)?,
            monitor_dir: monitor_dir(lookup)?,
            resolve_timeout,
        })
    }
}

/// Fully composed context for the launch and export handlers.
pub struct LauncherContext {
    pub config: LauncherConfig,
    /// Platform used to pick the engine binary.
    pub platform: Platform,
    pub table: PlatformTable,
    pub resolver: Arc<dyn AddressResolver>,
}

impl std::fmt::Debug for LauncherContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LauncherContext")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

/// Wire the production adapters.
pub fn bootstrap(config: LauncherConfig) -> LauncherContext {
    let resolver = Arc::new(SystemResolver::new(config.resolve_timeout));
    LauncherContext {
        config,
        platform: Platform::host(),
        table: PlatformTable::builtin(),
        resolver,
    }
}
