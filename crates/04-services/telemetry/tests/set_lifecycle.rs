//! Packet numbering, batch boundaries, and counter reset.

use telemetry::{ChannelConfig, TelemetryConfig, TelemetrySet};

fn seeded(set_size: usize, seed: u64) -> TelemetrySet {
    let mut config = TelemetryConfig::default();
    config.set_size = set_size;
    config.seed = Some(seed);
    TelemetrySet::new(config).expect("valid config")
}

#[test]
fn one_batch_yields_consecutive_numbers_then_regenerates() {
    let mut set = seeded(5, 1);
    for _ in 0..5 {
        set.next_packet();
    }
    let before = set.packet_counter();
    let batch = set.batch().clone();
    let numbers: Vec<u64> = (0..5).map(|_| set.next_packet().packet_number).collect();
    assert_ne!(set.batch(), &batch, "boundary call regenerated");
    assert_eq!(numbers, (before + 1..=before + 5).collect::<Vec<_>>());

    let regenerated = set.batch().clone();
    let next = set.next_packet();
    assert_eq!(next.packet_number, before + 6);
    assert_ne!(set.batch(), &regenerated);
    assert_eq!(next.battery, set.batch().battery[0]);
}

#[test]
fn reset_after_thirty_seven_packets_restarts_numbering() {
    let mut set = seeded(5, 2);
    for _ in 0..37 {
        set.next_packet();
    }
    assert_eq!(set.packet_counter(), 37);

    set.reset_counter();
    assert_eq!(set.cursor(), 0);
    assert_eq!(set.next_packet().packet_number, 1);
}

#[test]
fn default_channels_stay_in_their_bands() {
    let mut set = seeded(100, 3);
    let config = set.config().clone();
    for packet in set.by_ref().take(1_000) {
        assert!((config.battery.min..=config.battery.max).contains(&packet.battery));
        assert!((config.altitude.min..=config.altitude.max).contains(&packet.altitude));
        assert!((config.airspeed.min..=config.airspeed.max).contains(&packet.airspeed));
        assert!((config.temperature.min..=config.temperature.max).contains(&packet.temperature));
        assert!((config.fan.min..=config.fan.max).contains(&packet.fan_rpm));
    }
    assert_eq!(set.packet_counter(), 1_000);
}

#[test]
fn heading_varies_within_a_batch() {
    let set = seeded(64, 4);
    let first = set.batch().heading[0];
    assert!(set.batch().heading.iter().any(|h| *h != first));
}

#[test]
fn uniform_band_applies_to_every_channel() {
    let band = ChannelConfig::new(0.0, 30.0, 2.0);
    let config = TelemetryConfig::uniform(5, band);
    assert_eq!(config.fan, band);
    assert_eq!(config.battery, band);
}

#[test]
fn config_round_trips_through_json_with_defaults() {
    let json = r#"{ "set_size": 7, "fan": { "min": 0, "max": 10, "step_range": 1 } }"#;
    let config: TelemetryConfig = serde_json::from_str(json).expect("parse config");
    assert_eq!(config.set_size, 7);
    assert_eq!(config.fan, ChannelConfig::new(0.0, 10.0, 1.0));
    assert_eq!(config.battery, TelemetryConfig::default().battery);
    config.validate().expect("parsed config validates");
}
