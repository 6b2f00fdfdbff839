//! Bounded random walks.
//!
//! A walk starts at a uniform draw from the band and then moves by at most
//! `step_range` per sample. The sampling window around the previous value is
//! clamped into the band before drawing, so neither the band nor the step
//! envelope can be violated, including right at the edges.

use std::ops::Index;

use rand::Rng;

use crate::config::{Channel, ChannelConfig, Trend, MAX_SET_SIZE};
use crate::error::{TelemetryError, TelemetryResult};

/// Fixed-length sequence of samples for one channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalkSequence(Vec<f64>);

impl WalkSequence {
    /// Samples in generation order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the sequence holds no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sample at `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied()
    }

    /// Iterates over the samples.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

}

impl Index<usize> for WalkSequence {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

/// Validated walk generator for one channel.
///
/// Construction rejects bad bands, so [`BoundedWalk::generate`] is infallible.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundedWalk {
    band: ChannelConfig,
    set_size: usize,
}

impl BoundedWalk {
    /// Validates `band` and `set_size` for `channel`.
    pub fn new(channel: Channel, band: ChannelConfig, set_size: usize) -> TelemetryResult<Self> {
        if set_size < 1 || set_size > MAX_SET_SIZE {
            return Err(TelemetryError::invalid(format!(
                "{channel}: set size {set_size} outside 1..={MAX_SET_SIZE}"
            )));
        }
        band.validate(channel)?;
        Ok(Self { band, set_size })
    }

    /// Length of every generated sequence.
    pub fn set_size(&self) -> usize {
        self.set_size
    }

    /// Generates one sequence of `set_size` samples.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> WalkSequence {
        let ChannelConfig { min, max, .. } = self.band;
        let mut values = Vec::with_capacity(self.set_size);

        let first = self.settle(uniform(rng, min, max), min, max);
        values.push(first);

        let mut prev = first;
        while values.len() < self.set_size {
            let (lower, upper) = self.window(prev);
            let next = self.settle(uniform(rng, lower, upper), lower, upper);
            values.push(next);
            prev = next;
        }

        WalkSequence(values)
    }

    /// Sampling window for the sample after `prev`, clamped into the band.
    fn window(&self, prev: f64) -> (f64, f64) {
        let ChannelConfig {
            min,
            max,
            step_range,
            trend,
            ..
        } = self.band;
        let lower = (prev - step_range).clamp(min, max);
        let upper = match trend {
            Trend::Free => (prev + step_range).clamp(min, max),
            Trend::Draining => prev,
        };
        (lower, upper)
    }

    /// Applies rounding, then pulls the value back into `[lower, upper]`.
    fn settle(&self, value: f64, lower: f64, upper: f64) -> f64 {
        match self.band.decimal_precision {
            Some(places) => round_to(value, places).clamp(lower, upper),
            None => value,
        }
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lower: f64, upper: f64) -> f64 {
    if lower >= upper {
        lower
    } else {
        rng.gen_range(lower..=upper)
    }
}

fn round_to(value: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    (value * scale).round() / scale
}
