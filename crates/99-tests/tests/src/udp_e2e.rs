#![cfg(all(test, not(target_arch = "wasm32")))]

use std::net::UdpSocket;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use emitter::{Emitter, EmitterConfig};
use telemetry::{Packet, TelemetryConfig};
use telemetry_codecs::{JsonCodec, PacketCodec};
use transport::UdpTransport;

fn receiver() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_millis(200)))
        .expect("read timeout");
    let port = socket.local_addr().expect("receiver addr").port();
    (socket, port)
}

fn drain(socket: &UdpSocket) -> Vec<Vec<u8>> {
    let mut datagrams = Vec::new();
    let mut buf = [0u8; 2048];
    while let Ok((len, _)) = socket.recv_from(&mut buf) {
        datagrams.push(buf[..len].to_vec());
    }
    datagrams
}

fn run_for(port: u16, telemetry: TelemetryConfig, delay_ms: u64, run: Duration) {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EmitterConfig {
        host: "127.0.0.1".into(),
        port,
        delay_ms,
        verbose: false,
    };
    let transport = Arc::new(UdpTransport::bind_any().expect("bind sender"));
    let mut emitter = Emitter::new(config, telemetry, transport).expect("emitter");
    emitter.start().expect("start");
    thread::sleep(run);
    emitter.stop();
}

#[test]
fn datagrams_carry_one_decodable_packet_each() {
    let (socket, port) = receiver();
    let mut telemetry = TelemetryConfig::default();
    telemetry.set_size = 5;
    telemetry.seed = Some(21);
    run_for(port, telemetry.clone(), 10, Duration::from_millis(300));

    let packets: Vec<Packet> = drain(&socket)
        .iter()
        .map(|d| JsonCodec.decode(d).expect("one JSON object per datagram"))
        .collect();
    assert!(packets.len() >= 10, "received {} packets", packets.len());

    for (idx, packet) in packets.iter().enumerate() {
        assert_eq!(packet.packet_number, idx as u64 + 1);
        assert!((telemetry.battery.min..=telemetry.battery.max).contains(&packet.battery));
        assert!((telemetry.fan.min..=telemetry.fan.max).contains(&packet.fan_rpm));
    }
}

#[test]
fn walked_channels_respect_step_within_each_batch() {
    let (socket, port) = receiver();
    let mut telemetry = TelemetryConfig::default();
    telemetry.set_size = 4;
    telemetry.seed = Some(22);
    run_for(port, telemetry.clone(), 5, Duration::from_millis(300));

    let packets: Vec<Packet> = drain(&socket)
        .iter()
        .map(|d| JsonCodec.decode(d).expect("decode"))
        .collect();
    assert!(packets.len() >= 8);

    for batch in packets.chunks_exact(telemetry.set_size) {
        for pair in batch.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!((b.altitude - a.altitude).abs() <= telemetry.altitude.step_range + 1e-9);
            assert!((b.airspeed - a.airspeed).abs() <= telemetry.airspeed.step_range + 1e-9);
            assert!(b.battery <= a.battery, "battery drains within a batch");
            assert!(b.temperature <= a.temperature, "temperature drains within a batch");
        }
    }
}

#[test]
fn nothing_arrives_after_stop_returns() {
    let (socket, port) = receiver();
    run_for(port, TelemetryConfig::default(), 10, Duration::from_millis(100));
    let _ = drain(&socket);

    let deadline = Instant::now() + Duration::from_millis(300);
    let mut buf = [0u8; 2048];
    while Instant::now() < deadline {
        assert!(
            socket.recv_from(&mut buf).is_err(),
            "datagram received after stop"
        );
    }
}
