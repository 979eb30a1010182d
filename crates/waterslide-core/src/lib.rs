//! Core domain for the waterslide launcher.
//!
//! - [`config`]: the typed engine configuration document and its validation
//! - [`wire`]: base64 protobuf transcoding of that document
//! - [`platform`]: the `(os, arch)` → engine binary table
//! - [`paths`]: resource directory resolution
//! - [`ports`]: trait seams implemented by adapters
//!
//! Nothing here spawns processes or opens sockets; see `waterslide-runtime`
//! and `waterslide-axum` for that.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod paths;
pub mod platform;
pub mod ports;
pub mod wire;

// Re-export commonly used types for convenience
pub use config::{
    AudioConfig, AudioEncoding, DiscoveryConfig, EndpointConfig, FecConfig, InitConfig, Mode,
    MonitorConfig, MuxConfig, OpusConfig, PcmConfig, ServerAddr, validate_config,
};
pub use error::LaunchError;
pub use paths::{PathError, engine_bin_dir, monitor_dir, process_env, resource_root};
pub use platform::{BUILTIN_PLATFORMS, Platform, PlatformEntry, PlatformTable};
pub use ports::{AddressResolver, resolve_server_addr};
pub use wire::{WirePayload, decode, encode};
