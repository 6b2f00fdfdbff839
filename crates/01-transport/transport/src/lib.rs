//! Datagram transport used by the telemetry emitter.
//!
//! The emitter only needs a fire-and-forget `send`:
//! * [`Transport`] – the seam the emitter calls once per tick.
//! * [`UdpTransport`] – one bound UDP socket, one datagram per payload.
//! * [`RecordingTransport`] – in-memory double that captures payloads and can inject failures.
//! * [`TransportError`] – per-send failure surface; never fatal to the caller.

mod error;
mod recording;
mod udp;

pub use error::{TransportError, TransportResult};
pub use recording::{RecordingTransport, SentDatagram};
pub use udp::{UdpTransport, MAX_DATAGRAM_LEN};

/// Fire-and-forget datagram sender.
///
/// Implementations must not retry; the caller reports a failure and moves on.
pub trait Transport: Send + Sync {
    /// Sends `payload` as a single datagram to `host:port`.
    fn send(&self, payload: &[u8], host: &str, port: u16) -> TransportResult<()>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(&self, payload: &[u8], host: &str, port: u16) -> TransportResult<()> {
        (**self).send(payload, host, port)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, payload: &[u8], host: &str, port: u16) -> TransportResult<()> {
        (**self).send(payload, host, port)
    }
}
