#![deny(missing_docs)]
//! Synthetic vehicle telemetry.
//!
//! Five channels (battery, altitude, airspeed, temperature, fan) are produced
//! as bounded random walks; the sixth, heading, is an independent compass draw
//! per packet. A [`TelemetrySet`] holds one batch of all six and serves it
//! packet by packet, regenerating when the batch runs out while the packet
//! counter keeps climbing.

mod compass;
mod config;
mod error;
mod packet;
mod set;
mod walk;

pub use compass::{CompassSampler, Heading, ParseHeadingError};
pub use config::{
    Channel, ChannelConfig, TelemetryConfig, Trend, MAX_DECIMAL_PRECISION, MAX_SET_SIZE,
};
pub use error::{TelemetryError, TelemetryResult};
pub use packet::Packet;
pub use set::{Batch, TelemetrySet};
pub use walk::{BoundedWalk, WalkSequence};
