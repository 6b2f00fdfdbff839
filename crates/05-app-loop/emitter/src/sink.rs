use log::{info, warn};

use crate::error::TickError;

/// Receives each encoded packet while verbose mode is on.
pub trait PacketSink: Send + Sync {
    /// Called once per tick with the bytes about to be sent.
    fn emit(&self, payload: &[u8]);
}

/// Receives per-tick delivery failures.
pub trait ErrorSink: Send + Sync {
    /// Called once per failed tick.
    fn report(&self, packet_number: u64, error: &TickError);
}

/// Writes packets to the `log` facade at info level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl PacketSink for LogSink {
    fn emit(&self, payload: &[u8]) {
        info!("packet {}", String::from_utf8_lossy(payload));
    }
}

/// Discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PacketSink for NullSink {
    fn emit(&self, _payload: &[u8]) {}
}

impl ErrorSink for NullSink {
    fn report(&self, _packet_number: u64, _error: &TickError) {}
}

/// Writes failures to the `log` facade at warn level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogErrorSink;

impl ErrorSink for LogErrorSink {
    fn report(&self, packet_number: u64, error: &TickError) {
        warn!("packet {packet_number} not delivered: {error}");
    }
}
