use telemetry::TelemetryError;
use telemetry_codecs::CodecError;
use thiserror::Error;
use transport::TransportError;

/// Result alias for emitter lifecycle and configuration calls.
pub type EmitterResult<T> = Result<T, EmitterError>;

/// Errors returned to the caller driving the emitter.
#[derive(Debug, Error)]
pub enum EmitterError {
    /// Channel configuration was rejected.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    /// Emitter settings (destination, delay) were rejected.
    #[error("invalid emitter configuration: {0}")]
    InvalidConfig(String),

    /// The call is only allowed while the emitter is stopped.
    #[error("emitter is running; stop it before reconfiguring")]
    Running,

    /// The OS refused to start the emission thread.
    #[error("failed to spawn emitter thread: {0}")]
    Spawn(#[source] std::io::Error),
}

/// Why a single tick did not deliver its packet. Never stops the emitter.
#[derive(Debug, Error)]
pub enum TickError {
    /// The packet could not be encoded.
    #[error("encode failed: {0}")]
    Encode(#[from] CodecError),

    /// The transport rejected the datagram.
    #[error("send failed: {0}")]
    Transport(#[from] TransportError),
}
