//! Wire encodings for telemetry packets.
//!
//! The visualization client expects one self-describing JSON object per UDP
//! datagram, no framing. Field names are fixed by that client, so the mapping
//! from [`Packet`] fields to wire keys is spelled out in [`PacketWireV1`]
//! rather than derived from the Rust names.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use telemetry::{Heading, Packet};
use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encodes packets to datagram payloads and back.
pub trait PacketCodec: Clone + Send + Sync + 'static {
    fn encode(&self, packet: &Packet) -> CodecResult<Vec<u8>>;
    fn decode(&self, payload: &[u8]) -> CodecResult<Packet>;
}

/// Wire record, one per datagram. Key order matches the client's schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacketWireV1 {
    #[serde(rename = "batteryData")]
    pub battery_data: f64,
    #[serde(rename = "altitudeData")]
    pub altitude_data: f64,
    #[serde(rename = "headingData")]
    pub heading_data: Heading,
    #[serde(rename = "speedData")]
    pub speed_data: f64,
    #[serde(rename = "tempData")]
    pub temp_data: f64,
    #[serde(rename = "fanData")]
    pub fan_data: f64,
    #[serde(rename = "packetNumber")]
    pub packet_number: u64,
}

impl From<&Packet> for PacketWireV1 {
    fn from(packet: &Packet) -> Self {
        Self {
            battery_data: packet.battery,
            altitude_data: packet.altitude,
            heading_data: packet.heading,
            speed_data: packet.airspeed,
            temp_data: packet.temperature,
            fan_data: packet.fan_rpm,
            packet_number: packet.packet_number,
        }
    }
}

impl From<PacketWireV1> for Packet {
    fn from(wire: PacketWireV1) -> Self {
        Packet {
            battery: wire.battery_data,
            altitude: wire.altitude_data,
            heading: wire.heading_data,
            airspeed: wire.speed_data,
            temperature: wire.temp_data,
            fan_rpm: wire.fan_data,
            packet_number: wire.packet_number,
        }
    }
}

/// Compact JSON, one object per payload.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl PacketCodec for JsonCodec {
    fn encode(&self, packet: &Packet) -> CodecResult<Vec<u8>> {
        Ok(serde_json::to_vec(&PacketWireV1::from(packet))?)
    }

    fn decode(&self, payload: &[u8]) -> CodecResult<Packet> {
        let wire: PacketWireV1 = serde_json::from_slice(payload)?;
        Ok(wire.into())
    }
}
