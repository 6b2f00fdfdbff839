//! Channel bands and the per-set configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{TelemetryError, TelemetryResult};

/// Highest accepted `decimal_precision`; beyond this `f64` rounding is noise.
pub const MAX_DECIMAL_PRECISION: u32 = 12;

/// Largest accepted `set_size`. Each batch holds six sequences of this
/// length, so the bound caps a batch at a few tens of megabytes.
pub const MAX_SET_SIZE: usize = 1 << 20;

/// The six telemetry channels carried by every packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Remaining battery charge.
    Battery,
    /// Height above ground.
    Altitude,
    /// Compass heading; sampled, never walked.
    Heading,
    /// Forward speed.
    Airspeed,
    /// Pack temperature.
    Temperature,
    /// Cooling fan speed.
    Fan,
}

impl Channel {
    /// Channels generated as bounded random walks, in packet order.
    pub const WALKED: [Channel; 5] = [
        Channel::Battery,
        Channel::Altitude,
        Channel::Airspeed,
        Channel::Temperature,
        Channel::Fan,
    ];

    /// Lower-case channel name used in logs and errors.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Battery => "battery",
            Channel::Altitude => "altitude",
            Channel::Heading => "heading",
            Channel::Airspeed => "airspeed",
            Channel::Temperature => "temperature",
            Channel::Fan => "fan",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction a walk is allowed to move in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Each step may go up or down by at most the step range.
    #[default]
    Free,
    /// Each step may only hold or go down, like a draining battery.
    Draining,
}

/// Band and step envelope for one walked channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    /// Inclusive lower bound of the band.
    pub min: f64,
    /// Inclusive upper bound of the band.
    pub max: f64,
    /// Largest allowed absolute change between consecutive samples.
    pub step_range: f64,
    /// Decimal places kept on every sample; `None` keeps full precision.
    #[serde(default)]
    pub decimal_precision: Option<u32>,
    /// Allowed direction of travel.
    #[serde(default)]
    pub trend: Trend,
}

impl ChannelConfig {
    /// Free-moving channel with full precision.
    pub fn new(min: f64, max: f64, step_range: f64) -> Self {
        Self {
            min,
            max,
            step_range,
            decimal_precision: None,
            trend: Trend::Free,
        }
    }

    /// Returns a copy rounded to `places` decimals.
    pub fn with_precision(mut self, places: u32) -> Self {
        self.decimal_precision = Some(places);
        self
    }

    /// Returns a copy with the given trend.
    pub fn with_trend(mut self, trend: Trend) -> Self {
        self.trend = trend;
        self
    }

    /// Checks the band, step and precision for `channel`.
    pub fn validate(&self, channel: Channel) -> TelemetryResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(TelemetryError::invalid(format!(
                "{channel}: bounds must be finite (min={}, max={})",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(TelemetryError::invalid(format!(
                "{channel}: min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if !(self.max - self.min).is_finite() {
            return Err(TelemetryError::invalid(format!(
                "{channel}: band width {} to {} is not representable",
                self.min, self.max
            )));
        }
        if !self.step_range.is_finite() || self.step_range <= 0.0 {
            return Err(TelemetryError::invalid(format!(
                "{channel}: step range must be positive, got {}",
                self.step_range
            )));
        }
        if let Some(places) = self.decimal_precision {
            if places > MAX_DECIMAL_PRECISION {
                return Err(TelemetryError::invalid(format!(
                    "{channel}: decimal precision {places} exceeds {MAX_DECIMAL_PRECISION}"
                )));
            }
        }
        Ok(())
    }
}

/// Everything a [`crate::TelemetrySet`] needs to generate batches.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TelemetryConfig {
    /// Packets served per generated batch; shared by every channel.
    pub set_size: usize,
    /// Battery charge, percent.
    pub battery: ChannelConfig,
    /// Altitude, metres.
    pub altitude: ChannelConfig,
    /// Airspeed, metres per second.
    pub airspeed: ChannelConfig,
    /// Temperature, degrees.
    pub temperature: ChannelConfig,
    /// Fan speed, RPM.
    pub fan: ChannelConfig,
    /// Seed for a reproducible stream; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            set_size: 100,
            battery: ChannelConfig::new(0.0, 100.0, 2.0)
                .with_precision(0)
                .with_trend(Trend::Draining),
            altitude: ChannelConfig::new(0.0, 10.0, 1.0).with_precision(0),
            airspeed: ChannelConfig::new(0.0, 30.0, 2.0).with_precision(2),
            temperature: ChannelConfig::new(0.0, 150.0, 5.0)
                .with_precision(0)
                .with_trend(Trend::Draining),
            fan: ChannelConfig::new(0.0, 25_000.0, 5_000.0).with_precision(0),
            seed: None,
        }
    }
}

impl TelemetryConfig {
    /// Band for a walked channel; `None` for [`Channel::Heading`].
    pub fn channel(&self, channel: Channel) -> Option<&ChannelConfig> {
        match channel {
            Channel::Battery => Some(&self.battery),
            Channel::Altitude => Some(&self.altitude),
            Channel::Airspeed => Some(&self.airspeed),
            Channel::Temperature => Some(&self.temperature),
            Channel::Fan => Some(&self.fan),
            Channel::Heading => None,
        }
    }

    /// Applies the same band to every walked channel.
    pub fn uniform(set_size: usize, band: ChannelConfig) -> Self {
        Self {
            set_size,
            battery: band,
            altitude: band,
            airspeed: band,
            temperature: band,
            fan: band,
            seed: None,
        }
    }

    /// Validates the set size and every walked channel.
    pub fn validate(&self) -> TelemetryResult<()> {
        if self.set_size < 1 {
            return Err(TelemetryError::invalid("set size must be at least 1"));
        }
        if self.set_size > MAX_SET_SIZE {
            return Err(TelemetryError::invalid(format!(
                "set size {} exceeds {MAX_SET_SIZE}",
                self.set_size
            )));
        }
        for channel in Channel::WALKED {
            if let Some(band) = self.channel(channel) {
                band.validate(channel)?;
            }
        }
        Ok(())
    }
}
