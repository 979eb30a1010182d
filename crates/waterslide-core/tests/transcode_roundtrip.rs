//! Round-trip tests through the public transcoder API.

use waterslide_core::{
    InitConfig, LaunchError, Mode, ServerAddr, WirePayload, decode, encode,
};

const RECEIVER: &str = r#"{
    "mode": "receiver",
    "privateKey": "oKq2Z0yq1h4yQ9m7Yk3cJ8cB1q0x9Pp4o5QfQm8t2Vw=",
    "peerPublicKey": "bV2dQ8Zk9c3Yp0Lm4Jx7Hq1Rt6Wn5Fs2Ae8Gu3Io0Pk=",
    "discovery": { "serverAddr": [172, 16, 4, 9], "serverPort": 21000 },
    "endpoints": [{ "interface": "wlan0" }, { "interface": "rmnet_data0" }],
    "mux": { "maxChannels": 2, "maxPacketSize": 1200 },
    "audio": {
        "channelCount": 8,
        "ioSampleRate": 48000,
        "levelSlowAttack": 0.004,
        "levelSlowRelease": 0.0008,
        "levelFastAttack": 0.31,
        "levelFastRelease": 0.00003,
        "pcm": { "frameSize": 32, "sampleRate": 48000, "decodeRingLength": 8192 }
    },
    "fec": { "symbolLen": 512, "sourceSymbolsPerBlock": 4, "repairSymbolsPerBlock": 4 },
    "monitor": { "wsPort": 7681 }
}"#;

#[test]
fn receiver_document_round_trips() {
    let config = InitConfig::from_json_str(RECEIVER).unwrap();
    assert_eq!(config.mode, Mode::Receiver);
    assert_eq!(config.monitor.ui_port, None);

    let payload = encode(&config).unwrap();
    assert_eq!(decode(payload.as_str()).unwrap(), config);
}

#[test]
fn payload_is_single_argument_safe() {
    let config = InitConfig::from_json_str(RECEIVER).unwrap();
    let payload = encode(&config).unwrap();
    assert!(
        payload
            .as_str()
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/' || b == b'=')
    );
}

#[test]
fn encoding_is_deterministic() {
    let config = InitConfig::from_json_str(RECEIVER).unwrap();
    assert_eq!(encode(&config).unwrap(), encode(&config).unwrap());
}

#[test]
fn inspected_payload_exposes_monitor_fields() {
    let config = InitConfig::from_json_str(RECEIVER).unwrap();
    let text = encode(&config).unwrap().to_string();

    let payload = WirePayload::from_base64(text.clone()).unwrap();
    let inspected = payload.decode().unwrap();
    assert_eq!(inspected.monitor.ws_port, 7681);
    assert_eq!(inspected.monitor.ui_port, None);
    assert_eq!(payload.as_str(), text);
}

#[test]
fn symbolic_address_must_be_resolved_first() {
    let json = RECEIVER.replace("[172, 16, 4, 9]", "\"discovery.local\"");
    let config = InitConfig::from_json_str(&json).unwrap();
    assert_eq!(
        config.discovery.server_addr,
        ServerAddr::Host("discovery.local".to_string())
    );
    assert!(matches!(encode(&config), Err(LaunchError::Schema(_))));
}

#[test]
fn garbage_payload_is_rejected() {
    assert!(matches!(
        WirePayload::from_base64("%%%"),
        Err(LaunchError::Decode(_))
    ));
}
