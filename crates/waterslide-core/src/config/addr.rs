//! Server address representation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;

/// Discovery server endpoint as written by the operator.
///
/// JSON accepts either a byte array (`[10, 0, 0, 2]`) or a hostname string
/// (`"discovery.example.com"`). Only the octet form can be encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ServerAddrRepr", into = "ServerAddrRepr")]
pub enum ServerAddr {
    /// Resolved IPv4 address in dotted-quad order.
    Octets([u8; 4]),
    /// Hostname awaiting resolution.
    Host(String),
}

impl ServerAddr {
    /// Returns the octets if the address is already resolved.
    pub const fn octets(&self) -> Option<[u8; 4]> {
        match self {
            Self::Octets(octets) => Some(*octets),
            Self::Host(_) => None,
        }
    }

    /// Whether the address still needs a lookup.
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Octets(_))
    }
}

impl From<Ipv4Addr> for ServerAddr {
    fn from(addr: Ipv4Addr) -> Self {
        Self::Octets(addr.octets())
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Octets(octets) => write!(f, "{}", Ipv4Addr::from(*octets)),
            Self::Host(host) => write!(f, "{host}"),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ServerAddrRepr {
    Bytes(Vec<i64>),
    Text(String),
}

impl TryFrom<ServerAddrRepr> for ServerAddr {
    type Error = String;

    fn try_from(repr: ServerAddrRepr) -> Result<Self, Self::Error> {
        match repr {
            ServerAddrRepr::Bytes(bytes) => {
                if bytes.len() != 4 {
                    return Err(format!(
                        "serverAddr byte form must have exactly 4 octets (IPv4), got {}",
                        bytes.len()
                    ));
                }
                let mut octets = [0u8; 4];
                for (slot, value) in octets.iter_mut().zip(&bytes) {
                    *slot = u8::try_from(*value)
                        .map_err(|_| format!("serverAddr octet {value} is outside 0-255"))?;
                }
                Ok(Self::Octets(octets))
            }
            ServerAddrRepr::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err("serverAddr hostname cannot be empty".to_string());
                }
                Ok(Self::Host(trimmed.to_string()))
            }
        }
    }
}

impl From<ServerAddr> for ServerAddrRepr {
    fn from(addr: ServerAddr) -> Self {
        match addr {
            ServerAddr::Octets(octets) => {
                Self::Bytes(octets.iter().map(|&o| i64::from(o)).collect())
            }
            ServerAddr::Host(host) => Self::Text(host),
        }
    }
}
