use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EmitterError, EmitterResult};

/// Where and how often packets are sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// Destination host name or address.
    pub host: String,
    /// Destination UDP port.
    pub port: u16,
    /// Tick period in milliseconds.
    pub delay_ms: u64,
    /// Mirror every encoded packet to the packet sink.
    pub verbose: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 5005,
            delay_ms: 100,
            verbose: false,
        }
    }
}

impl EmitterConfig {
    /// Tick period.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Rejects an empty host, port 0, or a zero period.
    pub fn validate(&self) -> EmitterResult<()> {
        if self.host.trim().is_empty() {
            return Err(EmitterError::InvalidConfig("destination host is empty".into()));
        }
        if self.port == 0 {
            return Err(EmitterError::InvalidConfig("destination port must be non-zero".into()));
        }
        if self.delay_ms == 0 {
            return Err(EmitterError::InvalidConfig("tick delay must be at least 1 ms".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        EmitterConfig::default().validate().expect("defaults are valid");
        assert_eq!(EmitterConfig::default().delay(), Duration::from_millis(100));
    }

    #[test]
    fn zero_delay_and_port_are_rejected() {
        let mut config = EmitterConfig::default();
        config.delay_ms = 0;
        assert!(config.validate().is_err());

        let mut config = EmitterConfig::default();
        config.port = 0;
        assert!(config.validate().is_err());

        let mut config = EmitterConfig::default();
        config.host = "  ".into();
        assert!(config.validate().is_err());
    }
}
