//! The engine configuration document.
//!
//! [`InitConfig`] is the strongly typed form of the operator's JSON file and of
//! a decoded wire payload. Parsing and validation happen together in
//! [`InitConfig::from_json_str`], so any value of this type that came from
//! outside the process has already passed the engine's static limits.

mod addr;
mod validate;

pub use addr::ServerAddr;
pub use validate::{
    MAX_AUDIO_CHANNELS, MAX_DEVICE_NAME_LEN, MAX_ENDPOINTS, MAX_NET_IF_NAME_LEN, SEC_KEY_LENGTH,
    validate_config,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::LaunchError;

/// Engine role.
///
/// Accepts the numeric wire value (`0`, `1`) or the lowercase name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "ModeRepr")]
pub enum Mode {
    Sender,
    Receiver,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ModeRepr {
    Index(i64),
    Name(String),
}

impl TryFrom<ModeRepr> for Mode {
    type Error = String;

    fn try_from(repr: ModeRepr) -> Result<Self, Self::Error> {
        match repr {
            ModeRepr::Index(0) => Ok(Self::Sender),
            ModeRepr::Index(1) => Ok(Self::Receiver),
            ModeRepr::Index(other) => {
                Err(format!("mode {other} is not 0 (sender) or 1 (receiver)"))
            }
            ModeRepr::Name(name) => match name.to_ascii_lowercase().as_str() {
                "sender" => Ok(Self::Sender),
                "receiver" => Ok(Self::Receiver),
                _ => Err(format!("mode '{name}' is not 'sender' or 'receiver'")),
            },
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitConfig {
    pub mode: Mode,

    /// Local key for secure endpoints (base64, 44 chars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Remote key for secure endpoints (base64, 44 chars).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_public_key: Option<String>,

    pub discovery: DiscoveryConfig,
    pub endpoints: Vec<EndpointConfig>,
    pub mux: MuxConfig,
    pub audio: AudioConfig,
    pub fec: FecConfig,
    pub monitor: MonitorConfig,

    /// Video tuning block. The v1 wire schema has no slot for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<Value>,

    /// Unknown top-level keys, kept so they can be reported instead of vanishing.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub server_addr: ServerAddr,
    pub server_port: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EndpointConfig {
    /// Network interface name, e.g. `en0` or `wlan0`.
    pub interface: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MuxConfig {
    pub max_channels: u32,
    pub max_packet_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AudioConfig {
    pub channel_count: u32,
    pub io_sample_rate: u32,
    /// Capture/playback device (macOS only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    pub level_slow_attack: f32,
    pub level_slow_release: f32,
    pub level_fast_attack: f32,
    pub level_fast_release: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opus: Option<OpusConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pcm: Option<PcmConfig>,
}

/// Audio codec selected by an [`AudioConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEncoding<'a> {
    Opus(&'a OpusConfig),
    Pcm(&'a PcmConfig),
}

impl AudioConfig {
    /// The configured codec, if any. Validation guarantees at most one is set.
    pub const fn encoding(&self) -> Option<AudioEncoding<'_>> {
        match (&self.opus, &self.pcm) {
            (Some(opus), _) => Some(AudioEncoding::Opus(opus)),
            (None, Some(pcm)) => Some(AudioEncoding::Pcm(pcm)),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OpusConfig {
    /// Bits per second.
    pub bitrate: u32,
    /// Samples per frame; 240 is 5 ms at 48 kHz.
    pub frame_size: u32,
    pub max_packet_size: u32,
    pub decode_ring_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PcmConfig {
    pub frame_size: u32,
    pub sample_rate: u32,
    pub decode_ring_length: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FecConfig {
    pub symbol_len: u32,
    pub source_symbols_per_block: u32,
    pub repair_symbols_per_block: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MonitorConfig {
    /// Port of the engine's live-stats websocket.
    pub ws_port: u16,
    /// Port for the monitor UI gateway. Absent means no gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_port: Option<u16>,
}

impl InitConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LaunchError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| LaunchError::Schema(e.to_string()))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub async fn load(path: &Path) -> Result<Self, LaunchError> {
        let json = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LaunchError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(path = %path.display(), bytes = json.len(), "Read config file");

        Self::from_json_str(&json).map_err(|err| match err {
            LaunchError::Schema(msg) => {
                LaunchError::Schema(format!("{} ({msg})", path.display()))
            }
            other => other,
        })
    }

    /// Document keys that the wire schema cannot carry.
    pub fn unencoded_fields(&self) -> Vec<String> {
        let mut fields = Vec::new();
        if self.video.is_some() {
            fields.push("video".to_string());
        }
        fields.extend(self.extra.keys().cloned());
        fields
    }

    /// Whether the monitor gateway should be started.
    pub const fn ui_port(&self) -> Option<u16> {
        self.monitor.ui_port
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "mode": 0,
        "discovery": { "serverAddr": [10, 0, 0, 2], "serverPort": 9000 },
        "endpoints": [{ "interface": "en0" }, { "interface": "en1" }],
        "mux": { "maxChannels": 4, "maxPacketSize": 1400 },
        "audio": {
            "channelCount": 2,
            "ioSampleRate": 48000,
            "deviceName": "BlackHole 2ch",
            "levelSlowAttack": 0.004,
            "levelSlowRelease": 0.0008,
            "levelFastAttack": 0.31,
            "levelFastRelease": 0.00003,
            "opus": {
                "bitrate": 128000,
                "frameSize": 240,
                "maxPacketSize": 1276,
                "decodeRingLength": 4096
            }
        },
        "fec": { "symbolLen": 256, "sourceSymbolsPerBlock": 6, "repairSymbolsPerBlock": 2 },
        "monitor": { "wsPort": 7681, "uiPort": 8080 }
    }"#;

    #[test]
    fn parses_sample_document() {
        let config = InitConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(config.mode, Mode::Sender);
        assert_eq!(config.discovery.server_addr, ServerAddr::Octets([10, 0, 0, 2]));
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.ui_port(), Some(8080));
        assert!(matches!(config.audio.encoding(), Some(AudioEncoding::Opus(_))));
        assert!(config.unencoded_fields().is_empty());
    }

    #[test]
    fn mode_accepts_names() {
        let json = SAMPLE.replace("\"mode\": 0", "\"mode\": \"receiver\"");
        let config = InitConfig::from_json_str(&json).unwrap();
        assert_eq!(config.mode, Mode::Receiver);
    }

    #[test]
    fn invalid_mode_is_schema_error() {
        let json = SAMPLE.replace("\"mode\": 0", "\"mode\": 3");
        let err = InitConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, LaunchError::Schema(ref m) if m.contains("mode 3")), "{err}");
    }

    #[test]
    fn missing_block_is_schema_error() {
        let json: String = SAMPLE
            .lines()
            .filter(|line| !line.trim_start().starts_with("\"fec\""))
            .collect::<Vec<_>>()
            .join("\n");
        let err = InitConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, LaunchError::Schema(ref m) if m.contains("fec")), "{err}");
    }

    #[test]
    fn nested_typo_is_rejected() {
        let json = SAMPLE.replace("\"symbolLen\"", "\"symbolLength\"");
        let err = InitConfig::from_json_str(&json).unwrap_err();
        assert!(matches!(err, LaunchError::Schema(ref m) if m.contains("symbolLength")), "{err}");
    }

    #[test]
    fn top_level_unknown_keys_are_reported() {
        let json = SAMPLE.replacen(
            "\"mode\": 0,",
            "\"mode\": 0, \"video\": { \"width\": 1280 }, \"label\": \"studio\",",
            1,
        );
        let config = InitConfig::from_json_str(&json).unwrap();
        assert_eq!(config.unencoded_fields(), vec!["video", "label"]);
    }

    #[tokio::test]
    async fn load_missing_file_is_config_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = InitConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, LaunchError::ConfigRead { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[tokio::test]
    async fn load_names_file_on_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = InitConfig::load(&path).await.unwrap_err();
        assert!(matches!(err, LaunchError::Schema(ref m) if m.contains("broken.json")));
    }
}
