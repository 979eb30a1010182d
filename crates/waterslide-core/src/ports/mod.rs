//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! Implementations live in adapters (e.g., waterslide-runtime).

pub mod address_resolver;

pub use address_resolver::{AddressResolver, resolve_server_addr};

#[cfg(test)]
pub use address_resolver::MockAddressResolver;
