use crate::compass::Heading;

/// One telemetry sample across every channel.
///
/// Packets are plain values; they stay valid after the set that produced
/// them regenerates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Packet {
    /// Battery charge.
    pub battery: f64,
    /// Altitude.
    pub altitude: f64,
    /// Compass heading, drawn fresh for this packet.
    pub heading: Heading,
    /// Airspeed.
    pub airspeed: f64,
    /// Temperature.
    pub temperature: f64,
    /// Fan speed in RPM.
    pub fan_rpm: f64,
    /// 1-based sequence number, continuous across batches.
    pub packet_number: u64,
}
