//! Effective run settings: JSON file, then command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use emitter::EmitterConfig;
use serde::{Deserialize, Serialize};
use telemetry::TelemetryConfig;

/// Shape of the `--config` file. Every section and field is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub emitter: EmitterConfig,
    pub telemetry: TelemetryConfig,
}

/// Command-line values that win over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub delay_ms: Option<u64>,
    pub set_size: Option<usize>,
    pub seed: Option<u64>,
    pub verbose: bool,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {path:?}"))?;
        serde_json::from_str(&text).with_context(|| format!("failed to parse config {path:?}"))
    }

    pub fn apply(&mut self, overrides: Overrides) {
        let Overrides {
            host,
            port,
            delay_ms,
            set_size,
            seed,
            verbose,
        } = overrides;
        if let Some(host) = host {
            self.emitter.host = host;
        }
        if let Some(port) = port {
            self.emitter.port = port;
        }
        if let Some(delay_ms) = delay_ms {
            self.emitter.delay_ms = delay_ms;
        }
        if let Some(set_size) = set_size {
            self.telemetry.set_size = set_size;
        }
        if seed.is_some() {
            self.telemetry.seed = seed;
        }
        self.emitter.verbose |= verbose;
    }
}
