//! Mapping between [`InitConfig`] and the protobuf messages.

use super::schema::{
    AudioProto, DiscoveryProto, EndpointProto, FecProto, InitConfigProto, ModeProto, MonitorProto,
    MuxProto, OpusProto, PcmProto, audio_proto,
};
use crate::config::{
    AudioConfig, DiscoveryConfig, EndpointConfig, FecConfig, InitConfig, Mode, MonitorConfig,
    MuxConfig, OpusConfig, PcmConfig, ServerAddr,
};
use crate::error::LaunchError;
use std::collections::BTreeMap;

impl From<Mode> for ModeProto {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Sender => Self::Sender,
            Mode::Receiver => Self::Receiver,
        }
    }
}

pub(super) fn to_proto(config: &InitConfig) -> Result<InitConfigProto, LaunchError> {
    let octets = match &config.discovery.server_addr {
        ServerAddr::Octets(octets) => *octets,
        ServerAddr::Host(host) => {
            return Err(LaunchError::schema(
                "discovery.serverAddr",
                format!("'{host}' must be resolved to IPv4 octets before encoding"),
            ));
        }
    };

    let audio = &config.audio;
    let encoding = match (&audio.opus, &audio.pcm) {
        (Some(_), Some(_)) => {
            return Err(LaunchError::schema(
                "audio",
                "only one of 'opus' or 'pcm' may be set",
            ));
        }
        (Some(opus), None) => Some(audio_proto::Encoding::Opus(OpusProto {
            bitrate: opus.bitrate,
            frame_size: opus.frame_size,
            max_packet_size: opus.max_packet_size,
            decode_ring_length: opus.decode_ring_length,
        })),
        (None, Some(pcm)) => Some(audio_proto::Encoding::Pcm(PcmProto {
            frame_size: pcm.frame_size,
            sample_rate: pcm.sample_rate,
            decode_ring_length: pcm.decode_ring_length,
        })),
        (None, None) => None,
    };

    Ok(InitConfigProto {
        mode: ModeProto::from(config.mode) as i32,
        private_key: config.private_key.clone().unwrap_or_default(),
        peer_public_key: config.peer_public_key.clone().unwrap_or_default(),
        discovery: Some(DiscoveryProto {
            server_addr: octets.to_vec(),
            server_port: u32::from(config.discovery.server_port),
        }),
        endpoints: config
            .endpoints
            .iter()
            .map(|e| EndpointProto {
                interface: e.interface.clone(),
            })
            .collect(),
        mux: Some(MuxProto {
            max_channels: config.mux.max_channels,
            max_packet_size: config.mux.max_packet_size,
        }),
        audio: Some(AudioProto {
            channel_count: audio.channel_count,
            io_sample_rate: audio.io_sample_rate,
            device_name: audio.device_name.clone().unwrap_or_default(),
            level_slow_attack: audio.level_slow_attack,
            level_slow_release: audio.level_slow_release,
            level_fast_attack: audio.level_fast_attack,
            level_fast_release: audio.level_fast_release,
            encoding,
        }),
        fec: Some(FecProto {
            symbol_len: config.fec.symbol_len,
            source_symbols_per_block: config.fec.source_symbols_per_block,
            repair_symbols_per_block: config.fec.repair_symbols_per_block,
        }),
        monitor: Some(MonitorProto {
            ws_port: u32::from(config.monitor.ws_port),
            ui_port: config.monitor.ui_port.map(u32::from),
        }),
    })
}

pub(super) fn from_proto(proto: InitConfigProto) -> Result<InitConfig, LaunchError> {
    let mode = match ModeProto::try_from(proto.mode) {
        Ok(ModeProto::Sender) => Mode::Sender,
        Ok(ModeProto::Receiver) => Mode::Receiver,
        Err(_) => {
            return Err(LaunchError::schema(
                "mode",
                format!("unknown value {}", proto.mode),
            ));
        }
    };

    let discovery = required(proto.discovery, "discovery")?;
    let server_addr: [u8; 4] = discovery.server_addr.as_slice().try_into().map_err(|_| {
        LaunchError::schema(
            "discovery.serverAddr",
            format!(
                "expected 4 bytes (IPv4), got {}",
                discovery.server_addr.len()
            ),
        )
    })?;

    let mux = required(proto.mux, "mux")?;
    let audio = required(proto.audio, "audio")?;
    let fec = required(proto.fec, "fec")?;
    let monitor = required(proto.monitor, "monitor")?;

    let (opus, pcm) = match audio.encoding {
        Some(audio_proto::Encoding::Opus(opus)) => (
            Some(OpusConfig {
                bitrate: opus.bitrate,
                frame_size: opus.frame_size,
                max_packet_size: opus.max_packet_size,
                decode_ring_length: opus.decode_ring_length,
            }),
            None,
        ),
        Some(audio_proto::Encoding::Pcm(pcm)) => (
            None,
            Some(PcmConfig {
                frame_size: pcm.frame_size,
                sample_rate: pcm.sample_rate,
                decode_ring_length: pcm.decode_ring_length,
            }),
        ),
        None => (None, None),
    };

    Ok(InitConfig {
        mode,
        private_key: non_empty(proto.private_key),
        peer_public_key: non_empty(proto.peer_public_key),
        discovery: DiscoveryConfig {
            server_addr: ServerAddr::Octets(server_addr),
            server_port: port(discovery.server_port, "discovery.serverPort")?,
        },
        endpoints: proto
            .endpoints
            .into_iter()
            .map(|e| EndpointConfig {
                interface: e.interface,
            })
            .collect(),
        mux: MuxConfig {
            max_channels: mux.max_channels,
            max_packet_size: mux.max_packet_size,
        },
        audio: AudioConfig {
            channel_count: audio.channel_count,
            io_sample_rate: audio.io_sample_rate,
            device_name: non_empty(audio.device_name),
            level_slow_attack: audio.level_slow_attack,
            level_slow_release: audio.level_slow_release,
            level_fast_attack: audio.level_fast_attack,
            level_fast_release: audio.level_fast_release,
            opus,
            pcm,
        },
        fec: FecConfig {
            symbol_len: fec.symbol_len,
            source_symbols_per_block: fec.source_symbols_per_block,
            repair_symbols_per_block: fec.repair_symbols_per_block,
        },
        monitor: MonitorConfig {
            ws_port: port(monitor.ws_port, "monitor.wsPort")?,
            ui_port: monitor
                .ui_port
                .map(|p| port(p, "monitor.uiPort"))
                .transpose()?,
        },
        video: None,
        extra: BTreeMap::new(),
    })
}

fn required<T>(block: Option<T>, field: &str) -> Result<T, LaunchError> {
    block.ok_or_else(|| LaunchError::schema(field, "missing required block"))
}

fn port(value: u32, field: &str) -> Result<u16, LaunchError> {
    u16::try_from(value)
        .map_err(|_| LaunchError::schema(field, format!("{value} is not a valid port")))
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
