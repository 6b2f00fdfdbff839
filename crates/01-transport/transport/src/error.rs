//! Error handling helpers for the transport crate.
//!
//! Errors are per-send: a failed datagram says nothing
//! about the next one, so callers log and continue.

use std::io;
use thiserror::Error;

/// Convenience result alias for fallible transport operations.
pub type TransportResult<T, E = TransportError> = Result<T, E>;

/// Errors surfaced by a single send attempt.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Socket creation, resolution, or the send itself failed.
    #[error("datagram I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Payload exceeds what a single UDP datagram can carry.
    #[error("payload of {len} bytes exceeds the {max} byte datagram limit")]
    Oversize { len: usize, max: usize },

    /// The OS accepted fewer bytes than requested.
    #[error("short send: {sent} of {expected} bytes")]
    Truncated { sent: usize, expected: usize },
}

impl TransportError {
    /// Builds an I/O error carrying `msg`, used by doubles to inject failures.
    pub fn injected(msg: impl Into<String>) -> Self {
        TransportError::Io(io::Error::other(msg.into()))
    }
}
