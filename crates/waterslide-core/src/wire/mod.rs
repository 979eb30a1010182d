//! Wire transcoder: [`InitConfig`] ⇄ base64 protobuf payload.
//!
//! The engine receives its whole configuration as one process argument, so the
//! protobuf bytes travel as standard-alphabet base64 text.
//!
//! `encode` refuses documents whose server address is still a hostname; callers
//! resolve first (see [`crate::ports::resolve_server_addr`]). `decode` rejects
//! malformed base64 with [`LaunchError::Decode`] and anything that does not fit
//! the schema with [`LaunchError::Schema`]. Neither direction substitutes
//! defaults for missing data.

mod convert;
pub mod schema;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use prost::Message;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::{InitConfig, validate_config};
use crate::error::LaunchError;

/// Base64 wire payload passed to the engine as its only argument.
///
/// Immutable and cheap to clone; the encode step and the spawn argument share
/// the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirePayload(Arc<str>);

impl WirePayload {
    /// Wrap an operator-supplied payload, checking only that it is base64.
    ///
    /// The original text is kept verbatim so it can be handed to the engine
    /// unmodified.
    pub fn from_base64(text: impl Into<String>) -> Result<Self, LaunchError> {
        let text = text.into();
        decode_bytes(&text)?;
        Ok(Self(Arc::from(text)))
    }

    /// Decode the payload into a document.
    pub fn decode(&self) -> Result<InitConfig, LaunchError> {
        decode(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WirePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<std::ffi::OsStr> for WirePayload {
    fn as_ref(&self) -> &std::ffi::OsStr {
        self.as_str().as_ref()
    }
}

/// Encode a resolved document into a wire payload.
pub fn encode(config: &InitConfig) -> Result<WirePayload, LaunchError> {
    let unencoded = config.unencoded_fields();
    if !unencoded.is_empty() {
        warn!(
            fields = %unencoded.join(", "),
            "Config fields have no slot in wire schema v1 and will not reach the engine"
        );
    }

    let proto = convert::to_proto(config)?;
    let bytes = proto.encode_to_vec();
    debug!(bytes = bytes.len(), "Encoded init config");
    Ok(WirePayload(Arc::from(STANDARD.encode(bytes))))
}

/// Decode a base64 wire payload into a validated document.
pub fn decode(text: &str) -> Result<InitConfig, LaunchError> {
    let bytes = decode_bytes(text)?;
    let proto = schema::InitConfigProto::decode(bytes.as_slice())
        .map_err(|e| LaunchError::Schema(format!("payload is not an init config message: {e}")))?;
    let config = convert::from_proto(proto)?;
    validate_config(&config)?;
    Ok(config)
}

fn decode_bytes(text: &str) -> Result<Vec<u8>, LaunchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::Decode("payload is empty".to_string()));
    }
    STANDARD
        .decode(trimmed)
        .map_err(|e| LaunchError::Decode(e.to_string()))
}
