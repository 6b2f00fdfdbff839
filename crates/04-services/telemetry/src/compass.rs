//! Compass headings.

use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, Standard};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the eight principal compass points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// North.
    N,
    /// North-east.
    NE,
    /// East.
    E,
    /// South-east.
    SE,
    /// South.
    S,
    /// South-west.
    SW,
    /// West.
    W,
    /// North-west.
    NW,
}

impl Heading {
    /// Every heading, clockwise from north.
    pub const ALL: [Heading; 8] = [
        Heading::N,
        Heading::NE,
        Heading::E,
        Heading::SE,
        Heading::S,
        Heading::SW,
        Heading::W,
        Heading::NW,
    ];

    /// Label carried on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Heading::N => "N",
            Heading::NE => "NE",
            Heading::E => "E",
            Heading::SE => "SE",
            Heading::S => "S",
            Heading::SW => "SW",
            Heading::W => "W",
            Heading::NW => "NW",
        }
    }

    /// Position in [`Heading::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a label is not one of the eight compass points.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown heading label {0:?}")]
pub struct ParseHeadingError(pub String);

impl FromStr for Heading {
    type Err = ParseHeadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heading::ALL
            .into_iter()
            .find(|heading| heading.label() == s)
            .ok_or_else(|| ParseHeadingError(s.to_owned()))
    }
}

impl Distribution<Heading> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        Heading::ALL[rng.gen_range(0..Heading::ALL.len())]
    }
}

/// Stateless uniform heading source.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompassSampler;

impl CompassSampler {
    /// Draws one heading, uniform over all eight points.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Heading {
        rng.gen()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_point_including_north_west_is_drawn_evenly() {
        const DRAWS: usize = 16_000;
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut counts = [0usize; 8];
        for _ in 0..DRAWS {
            counts[CompassSampler.sample(&mut rng).index()] += 1;
        }
        let expected = DRAWS / Heading::ALL.len();
        for (heading, count) in Heading::ALL.iter().zip(counts) {
            assert!(
                count > expected * 3 / 4 && count < expected * 5 / 4,
                "{heading} drawn {count} times, expected about {expected}"
            );
        }
    }

    #[test]
    fn labels_parse_back() {
        for heading in Heading::ALL {
            assert_eq!(heading.label().parse::<Heading>(), Ok(heading));
        }
        assert!("NNE".parse::<Heading>().is_err());
    }

    #[test]
    fn index_matches_table_position() {
        for (idx, heading) in Heading::ALL.iter().enumerate() {
            assert_eq!(heading.index(), idx);
        }
    }
}
