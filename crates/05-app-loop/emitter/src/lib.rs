#![deny(missing_docs)]
//! Periodic telemetry emission.
//!
//! [`Emitter`] owns a [`telemetry::TelemetrySet`] and, while running, a
//! dedicated thread that ticks at a fixed period: next packet, encode, send.
//! A failed tick is reported and skipped; the stream carries on with the next
//! packet number.

mod config;
mod error;
mod scheduler;
mod sink;
mod stats;

pub use config::EmitterConfig;
pub use error::{EmitterError, EmitterResult, TickError};
pub use scheduler::{Emitter, EmitterState, THREAD_NAME};
pub use sink::{ErrorSink, LogErrorSink, LogSink, NullSink, PacketSink};
pub use stats::{EmitterStats, StatsHandle};
