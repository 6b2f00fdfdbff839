use thiserror::Error;

/// Result alias for telemetry construction.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors raised while validating telemetry configuration.
///
/// Generation itself cannot fail once a configuration has been accepted.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TelemetryError {
    /// A channel band, step, precision or set size is unusable.
    #[error("invalid telemetry configuration: {0}")]
    InvalidConfig(String),
}

impl TelemetryError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TelemetryError::InvalidConfig(msg.into())
    }
}
