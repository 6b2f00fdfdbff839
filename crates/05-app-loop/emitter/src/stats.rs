use std::sync::Arc;

use parking_lot::Mutex;

/// Counters updated by the emission thread.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct EmitterStats {
    /// Ticks executed, delivered or not.
    pub ticks: u64,
    /// Packets accepted by the transport.
    pub sent: u64,
    /// Packets the transport rejected.
    pub send_failures: u64,
    /// Packets that never reached the transport.
    pub encode_failures: u64,
    /// Number of the most recent packet, delivered or not.
    pub last_packet_number: u64,
}

impl EmitterStats {
    /// Ticks that did not deliver a packet.
    pub fn failures(&self) -> u64 {
        self.send_failures + self.encode_failures
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Shared handle to [`EmitterStats`]; cheap to clone into the tick thread.
#[derive(Clone, Default, Debug)]
pub struct StatsHandle(Arc<Mutex<EmitterStats>>);

impl StatsHandle {
    /// Runs `f` with the counters locked.
    pub fn with_stats<R>(&self, f: impl FnOnce(&mut EmitterStats) -> R) -> R {
        let mut guard = self.0.lock();
        f(&mut guard)
    }

    /// Copies the current counters.
    pub fn snapshot(&self) -> EmitterStats {
        *self.0.lock()
    }
}
