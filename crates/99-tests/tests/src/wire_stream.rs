#![cfg(all(test, not(target_arch = "wasm32")))]

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use emitter::{Emitter, EmitterConfig, PacketSink};
use parking_lot::Mutex;
use serde_json::Value;
use telemetry::{Heading, TelemetryConfig};
use transport::RecordingTransport;

const KEYS: [&str; 7] = [
    "batteryData",
    "altitudeData",
    "headingData",
    "speedData",
    "tempData",
    "fanData",
    "packetNumber",
];

#[derive(Default)]
struct Mirror(Mutex<Vec<Vec<u8>>>);

impl PacketSink for Mirror {
    fn emit(&self, payload: &[u8]) {
        self.0.lock().push(payload.to_vec());
    }
}

#[test]
fn stream_matches_client_schema_and_mirror() {
    let transport = Arc::new(RecordingTransport::new());
    let mirror = Arc::new(Mirror::default());
    let config = EmitterConfig {
        verbose: true,
        delay_ms: 5,
        ..EmitterConfig::default()
    };
    let mut emitter = Emitter::new(config, TelemetryConfig::default(), transport.clone())
        .expect("emitter")
        .with_packet_sink(mirror.clone());
    emitter.start().expect("start");
    thread::sleep(Duration::from_millis(150));
    emitter.stop();

    let sent = transport.snapshot();
    assert!(!sent.is_empty());
    assert_eq!(
        sent.iter().map(|d| d.payload.clone()).collect::<Vec<_>>(),
        *mirror.0.lock(),
        "verbose mirror sees exactly what was sent"
    );

    for datagram in &sent {
        let value: Value = serde_json::from_slice(&datagram.payload).expect("json");
        let object = value.as_object().expect("flat object");
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let mut expected = KEYS.to_vec();
        expected.sort_unstable();
        let mut actual = keys.clone();
        actual.sort_unstable();
        assert_eq!(actual, expected);

        let label = object["headingData"].as_str().expect("heading label");
        assert!(Heading::ALL.iter().any(|h| h.label() == label));
        for key in KEYS.iter().filter(|k| **k != "headingData") {
            assert!(object[*key].is_number(), "{key} should be numeric");
        }
    }
}
