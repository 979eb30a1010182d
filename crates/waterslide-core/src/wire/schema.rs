//! Protobuf messages for `init-config` v1.
//!
//! Hand-written `prost` derives; the engine side is generated from the same
//! field numbers. Tags must never be renumbered.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InitConfigProto {
    #[prost(enumeration = "ModeProto", tag = "1")]
    pub mode: i32,
    #[prost(string, tag = "2")]
    pub private_key: String,
    #[prost(string, tag = "3")]
    pub peer_public_key: String,
    #[prost(message, optional, tag = "4")]
    pub discovery: Option<DiscoveryProto>,
    #[prost(message, repeated, tag = "5")]
    pub endpoints: Vec<EndpointProto>,
    #[prost(message, optional, tag = "6")]
    pub mux: Option<MuxProto>,
    #[prost(message, optional, tag = "7")]
    pub audio: Option<AudioProto>,
    #[prost(message, optional, tag = "8")]
    pub fec: Option<FecProto>,
    #[prost(message, optional, tag = "9")]
    pub monitor: Option<MonitorProto>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ModeProto {
    Sender = 0,
    Receiver = 1,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DiscoveryProto {
    #[prost(bytes = "vec", tag = "1")]
    pub server_addr: Vec<u8>,
    #[prost(uint32, tag = "2")]
    pub server_port: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndpointProto {
    #[prost(string, tag = "1")]
    pub interface: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MuxProto {
    #[prost(uint32, tag = "1")]
    pub max_channels: u32,
    #[prost(uint32, tag = "2")]
    pub max_packet_size: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AudioProto {
    #[prost(uint32, tag = "1")]
    pub channel_count: u32,
    #[prost(uint32, tag = "2")]
    pub io_sample_rate: u32,
    #[prost(string, tag = "3")]
    pub device_name: String,
    #[prost(float, tag = "4")]
    pub level_slow_attack: f32,
    #[prost(float, tag = "5")]
    pub level_slow_release: f32,
    #[prost(float, tag = "6")]
    pub level_fast_attack: f32,
    #[prost(float, tag = "7")]
    pub level_fast_release: f32,
    #[prost(oneof = "audio_proto::Encoding", tags = "8, 9")]
    pub encoding: Option<audio_proto::Encoding>,
}

pub mod audio_proto {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Encoding {
        #[prost(message, tag = "8")]
        Opus(super::OpusProto),
        #[prost(message, tag = "9")]
        Pcm(super::PcmProto),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OpusProto {
    #[prost(uint32, tag = "1")]
    pub bitrate: u32,
    #[prost(uint32, tag = "2")]
    pub frame_size: u32,
    #[prost(uint32, tag = "3")]
    pub max_packet_size: u32,
    #[prost(uint32, tag = "4")]
    pub decode_ring_length: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PcmProto {
    #[prost(uint32, tag = "1")]
    pub frame_size: u32,
    #[prost(uint32, tag = "2")]
    pub sample_rate: u32,
    #[prost(uint32, tag = "3")]
    pub decode_ring_length: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FecProto {
    #[prost(uint32, tag = "1")]
    pub symbol_len: u32,
    #[prost(uint32, tag = "2")]
    pub source_symbols_per_block: u32,
    #[prost(uint32, tag = "3")]
    pub repair_symbols_per_block: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MonitorProto {
    #[prost(uint32, tag = "1")]
    pub ws_port: u32,
    #[prost(uint32, optional, tag = "2")]
    pub ui_port: Option<u32>,
}
