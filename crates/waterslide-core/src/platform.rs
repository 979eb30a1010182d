//! Engine binary selection by host platform.
//!
//! The mapping lives in [`BUILTIN_PLATFORMS`]. Supporting a new host or bumping
//! a macOS/Android ABI is a one-line edit to that table; the lookup code never
//! branches on a specific platform.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// Binary family shared by every engine build.
pub const ENGINE_FAMILY: &str = "waterslide";

/// Host identifiers, using Rust's `std::env::consts` spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: String,
    pub arch: String,
}

impl Platform {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// The platform this launcher was compiled for.
    pub fn host() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// One row of the platform table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformEntry {
    pub os: &'static str,
    pub arch: &'static str,
    /// Binary family name.
    pub family: &'static str,
    /// ABI/version suffix, e.g. `macos11` or `android30`.
    pub abi: &'static str,
}

impl PlatformEntry {
    /// File name of the engine binary for this entry.
    pub fn binary_name(&self) -> String {
        format!("{}-{}", self.family, self.abi)
    }
}

/// Platforms with a shipped engine build.
pub const BUILTIN_PLATFORMS: &[PlatformEntry] = &[
    PlatformEntry {
        os: "macos",
        arch: "aarch64",
        family: ENGINE_FAMILY,
        abi: "macos-arm64",
    },
    PlatformEntry {
        os: "macos",
        arch: "x86_64",
        family: ENGINE_FAMILY,
        abi: "macos11",
    },
    PlatformEntry {
        os: "android",
        arch: "aarch64",
        family: ENGINE_FAMILY,
        abi: "android30",
    },
    PlatformEntry {
        os: "linux",
        arch: "x86_64",
        family: ENGINE_FAMILY,
        abi: "linux-x64",
    },
];

/// Lookup table keyed by `(os, arch)`.
#[derive(Debug, Clone)]
pub struct PlatformTable {
    entries: Vec<PlatformEntry>,
}

impl Default for PlatformTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PlatformTable {
    /// Table with the shipped engine builds.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_PLATFORMS.to_vec())
    }

    pub const fn new(entries: Vec<PlatformEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlatformEntry] {
        &self.entries
    }

    /// Find the entry for a platform.
    pub fn lookup(&self, platform: &Platform) -> Result<&PlatformEntry, LaunchError> {
        self.entries
            .iter()
            .find(|e| e.os == platform.os && e.arch == platform.arch)
            .ok_or_else(|| LaunchError::UnsupportedPlatform {
                os: platform.os.clone(),
                arch: platform.arch.clone(),
            })
    }

    /// Path of the engine binary for `platform` inside `bin_dir`.
    pub fn select(&self, platform: &Platform, bin_dir: &Path) -> Result<PathBuf, LaunchError> {
        let entry = self.lookup(platform)?;
        Ok(bin_dir.join(entry.binary_name()))
    }
}
