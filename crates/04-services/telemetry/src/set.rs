//! Batch ownership and packet numbering.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::compass::{CompassSampler, Heading};
use crate::config::{Channel, TelemetryConfig};
use crate::error::TelemetryResult;
use crate::packet::Packet;
use crate::walk::{BoundedWalk, WalkSequence};

/// One generated batch: five walks and a heading per slot, all `set_size` long.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    /// Battery walk.
    pub battery: WalkSequence,
    /// Altitude walk.
    pub altitude: WalkSequence,
    /// Independent heading draw per slot.
    pub heading: Vec<Heading>,
    /// Airspeed walk.
    pub airspeed: WalkSequence,
    /// Temperature walk.
    pub temperature: WalkSequence,
    /// Fan walk.
    pub fan: WalkSequence,
}

#[derive(Clone, Copy, Debug)]
struct Walks {
    battery: BoundedWalk,
    altitude: BoundedWalk,
    airspeed: BoundedWalk,
    temperature: BoundedWalk,
    fan: BoundedWalk,
}

impl Walks {
    fn new(config: &TelemetryConfig) -> TelemetryResult<Self> {
        config.validate()?;
        let size = config.set_size;
        Ok(Self {
            battery: BoundedWalk::new(Channel::Battery, config.battery, size)?,
            altitude: BoundedWalk::new(Channel::Altitude, config.altitude, size)?,
            airspeed: BoundedWalk::new(Channel::Airspeed, config.airspeed, size)?,
            temperature: BoundedWalk::new(Channel::Temperature, config.temperature, size)?,
            fan: BoundedWalk::new(Channel::Fan, config.fan, size)?,
        })
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R, set_size: usize) -> Batch {
        let compass = CompassSampler;
        Batch {
            battery: self.battery.generate(rng),
            altitude: self.altitude.generate(rng),
            heading: (0..set_size).map(|_| compass.sample(rng)).collect(),
            airspeed: self.airspeed.generate(rng),
            temperature: self.temperature.generate(rng),
            fan: self.fan.generate(rng),
        }
    }
}

/// Serves packets from the current batch, regenerating when it runs out.
///
/// Exactly `set_size` packets come out of every batch (slots `0..set_size`),
/// and the packet counter never resets except through
/// [`TelemetrySet::reset_counter`].
pub struct TelemetrySet<R = StdRng> {
    config: TelemetryConfig,
    walks: Walks,
    rng: R,
    batch: Batch,
    cursor: usize,
    packet_counter: u64,
}

impl TelemetrySet<StdRng> {
    /// Builds a set seeded from `config.seed`, or from OS entropy.
    pub fn new(config: TelemetryConfig) -> TelemetryResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> TelemetrySet<R> {
    /// Builds a set drawing from `rng`; the first batch is generated eagerly.
    pub fn with_rng(config: TelemetryConfig, mut rng: R) -> TelemetryResult<Self> {
        let walks = Walks::new(&config)?;
        let batch = walks.generate(&mut rng, config.set_size);
        Ok(Self {
            config,
            walks,
            rng,
            batch,
            cursor: 0,
            packet_counter: 0,
        })
    }

    /// Returns the next packet, regenerating the batch first if it is spent.
    pub fn next_packet(&mut self) -> Packet {
        if self.cursor >= self.config.set_size {
            self.regenerate();
        }
        self.packet_counter += 1;

        let idx = self.cursor;
        let batch = &self.batch;
        let packet = Packet {
            battery: batch.battery[idx],
            altitude: batch.altitude[idx],
            heading: batch.heading[idx],
            airspeed: batch.airspeed[idx],
            temperature: batch.temperature[idx],
            fan_rpm: batch.fan[idx],
            packet_number: self.packet_counter,
        };
        self.cursor += 1;
        packet
    }

    /// Starts over: fresh batch, cursor 0, counter 0.
    pub fn reset_counter(&mut self) {
        self.regenerate();
        self.packet_counter = 0;
        debug!("telemetry counter reset");
    }

    /// Packets served so far (the last packet's number).
    pub fn packet_counter(&self) -> u64 {
        self.packet_counter
    }

    /// Slot the next packet will be read from; equals `set_size` when spent.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Packets per batch.
    pub fn set_size(&self) -> usize {
        self.config.set_size
    }

    /// Configuration the set was built from.
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }

    /// Current batch.
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    fn regenerate(&mut self) {
        self.batch = self.walks.generate(&mut self.rng, self.config.set_size);
        self.cursor = 0;
        debug!(
            "regenerated telemetry batch of {} samples after packet {}",
            self.config.set_size, self.packet_counter
        );
    }
}

impl<R: Rng> Iterator for TelemetrySet<R> {
    type Item = Packet;

    fn next(&mut self) -> Option<Packet> {
        Some(self.next_packet())
    }
}
