//! Static limits enforced by the engine, checked before launch.

use super::InitConfig;
use crate::error::LaunchError;

/// Maximum number of network endpoints.
pub const MAX_ENDPOINTS: usize = 16;

/// Maximum number of audio channels.
pub const MAX_AUDIO_CHANNELS: u32 = 64;

/// Maximum interface name length in bytes.
pub const MAX_NET_IF_NAME_LEN: usize = 20;

/// Maximum audio device name length in bytes.
pub const MAX_DEVICE_NAME_LEN: usize = 100;

/// Length of a base64 encoded key, without terminator.
pub const SEC_KEY_LENGTH: usize = 44;

/// Validate a parsed document against the engine's limits.
pub fn validate_config(config: &InitConfig) -> Result<(), LaunchError> {
    if config.endpoints.len() > MAX_ENDPOINTS {
        return Err(LaunchError::schema(
            "endpoints",
            format!(
                "too many endpoints ({}), max is {MAX_ENDPOINTS}",
                config.endpoints.len()
            ),
        ));
    }

    for (i, endpoint) in config.endpoints.iter().enumerate() {
        check_name(
            &format!("endpoints[{i}].interface"),
            &endpoint.interface,
            MAX_NET_IF_NAME_LEN,
        )?;
    }

    if config.audio.channel_count > MAX_AUDIO_CHANNELS {
        return Err(LaunchError::schema(
            "audio.channelCount",
            format!(
                "too many audio channels ({}), max is {MAX_AUDIO_CHANNELS}",
                config.audio.channel_count
            ),
        ));
    }

    if let Some(ref device) = config.audio.device_name {
        check_name("audio.deviceName", device, MAX_DEVICE_NAME_LEN)?;
    }

    if config.audio.opus.is_some() && config.audio.pcm.is_some() {
        return Err(LaunchError::schema(
            "audio",
            "only one of 'opus' or 'pcm' may be set",
        ));
    }

    for (field, key) in [
        ("privateKey", &config.private_key),
        ("peerPublicKey", &config.peer_public_key),
    ] {
        if let Some(key) = key {
            if key.len() != SEC_KEY_LENGTH {
                return Err(LaunchError::schema(
                    field,
                    format!(
                        "expected a {SEC_KEY_LENGTH} character base64 key, got {} characters",
                        key.len()
                    ),
                ));
            }
        }
    }

    Ok(())
}

/// The engine receives names byte for byte, so the checked string must be the
/// encoded one: no surrounding whitespace, length counted in bytes.
fn check_name(field: &str, value: &str, max_len: usize) -> Result<(), LaunchError> {
    if value.trim().is_empty() {
        return Err(LaunchError::schema(field, "cannot be empty"));
    }
    if value.trim() != value {
        return Err(LaunchError::schema(
            field,
            format!("'{value}' has leading or trailing whitespace"),
        ));
    }
    if value.len() > max_len {
        return Err(LaunchError::schema(
            field,
            format!("'{value}' is longer than {max_len} bytes"),
        ));
    }
    Ok(())
}
