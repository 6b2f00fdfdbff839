use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;

use crate::{Transport, TransportError, TransportResult};

/// One datagram captured by [`RecordingTransport`].
#[derive(Clone, Debug)]
pub struct SentDatagram {
    pub payload: Vec<u8>,
    pub host: String,
    pub port: u16,
}

/// In-memory transport that records every successful send.
///
/// `fail_next(n)` makes the following `n` sends fail without recording them.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentDatagram>>,
    failures_pending: AtomicU32,
    attempts: AtomicU32,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `count` injected failures for the next sends.
    pub fn fail_next(&self, count: u32) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }

    /// Number of recorded (successful) sends.
    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Copies out everything recorded so far.
    pub fn snapshot(&self) -> Vec<SentDatagram> {
        self.sent.lock().clone()
    }

    /// Removes and returns everything recorded so far.
    pub fn take(&self) -> Vec<SentDatagram> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl Transport for RecordingTransport {
    fn send(&self, payload: &[u8], host: &str, port: u16) -> TransportResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let injected = self
            .failures_pending
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |pending| {
                pending.checked_sub(1)
            })
            .is_ok();
        if injected {
            return Err(TransportError::injected("injected send failure"));
        }
        self.sent.lock().push(SentDatagram {
            payload: payload.to_vec(),
            host: host.to_owned(),
            port,
        });
        Ok(())
    }
}
