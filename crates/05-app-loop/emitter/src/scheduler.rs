//! Emission lifecycle: `Idle -> Running -> Stopping -> Idle`.
//!
//! While running, the [`TelemetrySet`] lives on the emission thread and is
//! handed back when the thread is joined, so it is never shared. The caller
//! keeps only the stop channel, the verbose flag, and the stats handle.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{select, Receiver, SendError, Sender, TryRecvError};
use log::{debug, error, info, trace};
use telemetry::{TelemetryConfig, TelemetrySet};
use telemetry_codecs::{JsonCodec, PacketCodec};
use transport::Transport;

use crate::config::EmitterConfig;
use crate::error::{EmitterError, EmitterResult, TickError};
use crate::sink::{ErrorSink, LogErrorSink, LogSink, PacketSink};
use crate::stats::{EmitterStats, StatsHandle};

/// Name given to the emission thread.
pub const THREAD_NAME: &str = "telemetry-emitter";

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmitterState {
    /// No emission thread exists.
    Idle,
    /// The emission thread is ticking.
    Running,
    /// Stop was requested and the thread is being joined.
    Stopping,
}

struct Worker {
    stop_tx: Sender<()>,
    handle: JoinHandle<Option<TelemetrySet>>,
}

/// Body of the emission thread; yields the set back when it exits.
type WorkerBody = Box<dyn FnOnce() -> Option<TelemetrySet> + Send + 'static>;

fn spawn_named(body: WorkerBody) -> io::Result<JoinHandle<Option<TelemetrySet>>> {
    thread::Builder::new().name(THREAD_NAME.to_owned()).spawn(body)
}

/// Everything one tick needs, moved onto the emission thread.
struct TickContext<C> {
    transport: Arc<dyn Transport>,
    codec: C,
    packets: Arc<dyn PacketSink>,
    errors: Arc<dyn ErrorSink>,
    verbose: Arc<AtomicBool>,
    stats: StatsHandle,
    host: String,
    port: u16,
}

impl<C: PacketCodec> TickContext<C> {
    fn tick(&self, telemetry: &mut TelemetrySet) {
        let packet = telemetry.next_packet();
        let number = packet.packet_number;
        self.stats.with_stats(|stats| {
            stats.ticks += 1;
            stats.last_packet_number = number;
        });

        let payload = match self.codec.encode(&packet) {
            Ok(payload) => payload,
            Err(err) => {
                self.stats.with_stats(|stats| stats.encode_failures += 1);
                self.errors.report(number, &TickError::from(err));
                return;
            }
        };

        if self.verbose.load(Ordering::Relaxed) {
            self.packets.emit(&payload);
        }

        match self.transport.send(&payload, &self.host, self.port) {
            Ok(()) => {
                self.stats.with_stats(|stats| stats.sent += 1);
                trace!("packet {number} sent to {}:{}", self.host, self.port);
            }
            Err(err) => {
                self.stats.with_stats(|stats| stats.send_failures += 1);
                self.errors.report(number, &TickError::from(err));
            }
        }
    }

    fn run(&self, telemetry: &mut TelemetrySet, period: Duration, stop_rx: &Receiver<()>) {
        let ticker = crossbeam_channel::tick(period);
        loop {
            select! {
                recv(stop_rx) -> _ => break,
                recv(ticker) -> _ => {
                    if !matches!(stop_rx.try_recv(), Err(TryRecvError::Empty)) {
                        break;
                    }
                    self.tick(telemetry);
                }
            }
        }
    }
}

/// Sends one packet per period to a fixed destination until stopped.
///
/// At most one emission thread exists per emitter; [`Emitter::start`] on a
/// running emitter stops the old thread before spawning a new one, and
/// [`Emitter::stop`] returns only after the thread has been joined.
pub struct Emitter<C: PacketCodec = JsonCodec> {
    config: EmitterConfig,
    telemetry_config: TelemetryConfig,
    transport: Arc<dyn Transport>,
    codec: C,
    packets: Arc<dyn PacketSink>,
    errors: Arc<dyn ErrorSink>,
    verbose: Arc<AtomicBool>,
    stats: StatsHandle,
    state: EmitterState,
    telemetry: Option<TelemetrySet>,
    worker: Option<Worker>,
}

impl Emitter<JsonCodec> {
    /// Builds an idle emitter that encodes packets as JSON.
    pub fn new(
        config: EmitterConfig,
        telemetry_config: TelemetryConfig,
        transport: Arc<dyn Transport>,
    ) -> EmitterResult<Self> {
        Self::with_codec(config, telemetry_config, transport, JsonCodec)
    }
}

impl<C: PacketCodec> Emitter<C> {
    /// Builds an idle emitter with a custom codec. Configuration errors
    /// surface here, before anything is generated or sent.
    pub fn with_codec(
        config: EmitterConfig,
        telemetry_config: TelemetryConfig,
        transport: Arc<dyn Transport>,
        codec: C,
    ) -> EmitterResult<Self> {
        config.validate()?;
        let telemetry = TelemetrySet::new(telemetry_config.clone())?;
        let verbose = Arc::new(AtomicBool::new(config.verbose));
        Ok(Self {
            config,
            telemetry_config,
            transport,
            codec,
            packets: Arc::new(LogSink),
            errors: Arc::new(LogErrorSink),
            verbose,
            stats: StatsHandle::default(),
            state: EmitterState::Idle,
            telemetry: Some(telemetry),
            worker: None,
        })
    }

    /// Replaces the verbose-mode packet sink. Applies from the next start.
    pub fn with_packet_sink(mut self, sink: Arc<dyn PacketSink>) -> Self {
        self.packets = sink;
        self
    }

    /// Replaces the failure sink. Applies from the next start.
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.errors = sink;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> EmitterState {
        self.state
    }

    /// True while the emission thread is ticking.
    pub fn is_running(&self) -> bool {
        self.state == EmitterState::Running
    }

    /// Starts ticking. A running emitter is fully stopped first.
    pub fn start(&mut self) -> EmitterResult<()> {
        self.start_with(spawn_named)
    }

    /// The set is handed to the thread only after it exists, so a failed
    /// spawn leaves it (and its numbering) with the emitter.
    fn start_with<S>(&mut self, spawn: S) -> EmitterResult<()>
    where
        S: FnOnce(WorkerBody) -> io::Result<JoinHandle<Option<TelemetrySet>>>,
    {
        if self.is_running() {
            info!("emitter already running; restarting");
            self.stop();
        }

        let telemetry = self.take_telemetry()?;
        let (stop_tx, stop_rx) = crossbeam_channel::bounded(1);
        let (set_tx, set_rx) = crossbeam_channel::bounded::<TelemetrySet>(1);
        let period = self.config.delay();
        let ctx = TickContext {
            transport: Arc::clone(&self.transport),
            codec: self.codec.clone(),
            packets: Arc::clone(&self.packets),
            errors: Arc::clone(&self.errors),
            verbose: Arc::clone(&self.verbose),
            stats: self.stats.clone(),
            host: self.config.host.clone(),
            port: self.config.port,
        };

        let body: WorkerBody = Box::new(move || {
            let mut telemetry = set_rx.recv().ok()?;
            ctx.run(&mut telemetry, period, &stop_rx);
            Some(telemetry)
        });
        let handle = match spawn(body) {
            Ok(handle) => handle,
            Err(err) => {
                self.telemetry = Some(telemetry);
                return Err(EmitterError::Spawn(err));
            }
        };
        if let Err(SendError(telemetry)) = set_tx.send(telemetry) {
            let _ = handle.join();
            self.telemetry = Some(telemetry);
            return Err(EmitterError::Spawn(io::Error::other(
                "emitter thread exited before receiving telemetry",
            )));
        }

        self.worker = Some(Worker { stop_tx, handle });
        self.state = EmitterState::Running;
        info!(
            "emitter started: {}:{} every {:?}",
            self.config.host, self.config.port, period
        );
        Ok(())
    }

    /// Signals the emission thread and blocks until it has exited.
    /// No-op when idle.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        self.state = EmitterState::Stopping;
        debug!("stopping emitter");

        // A full or disconnected channel both mean the loop will see the stop.
        let _ = worker.stop_tx.try_send(());
        match worker.handle.join() {
            Ok(Some(telemetry)) => self.telemetry = Some(telemetry),
            Ok(None) | Err(_) => {
                error!("emitter thread panicked; rebuilding telemetry from config");
                self.telemetry = TelemetrySet::new(self.telemetry_config.clone()).ok();
            }
        }

        self.state = EmitterState::Idle;
        info!(
            "emitter stopped after packet {}",
            self.stats.snapshot().last_packet_number
        );
    }

    /// Toggles mirroring packets to the packet sink; seen by the next tick.
    pub fn set_verbose(&self, verbose: bool) {
        self.verbose.store(verbose, Ordering::Relaxed);
    }

    /// Whether verbose mode is on.
    pub fn is_verbose(&self) -> bool {
        self.verbose.load(Ordering::Relaxed)
    }

    /// Restarts packet numbering with a fresh batch and zeroes the stats.
    /// A running emitter is stopped first and left idle.
    pub fn reset_counter(&mut self) -> EmitterResult<()> {
        if self.is_running() {
            info!("stopping emitter to reset the packet counter");
            self.stop();
        }
        match self.telemetry.as_mut() {
            Some(telemetry) => telemetry.reset_counter(),
            None => self.telemetry = Some(TelemetrySet::new(self.telemetry_config.clone())?),
        }
        self.stats.with_stats(EmitterStats::reset);
        Ok(())
    }

    /// Changes the destination. Rejected while running.
    pub fn set_destination(&mut self, host: impl Into<String>, port: u16) -> EmitterResult<()> {
        self.ensure_idle()?;
        let mut config = self.config.clone();
        config.host = host.into();
        config.port = port;
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Changes the tick period. Rejected while running.
    pub fn set_delay(&mut self, delay: Duration) -> EmitterResult<()> {
        self.ensure_idle()?;
        let mut config = self.config.clone();
        config.delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Swaps in new channel settings. Rejected while running; numbering
    /// restarts at 1 because the old set is discarded.
    pub fn set_telemetry_config(&mut self, telemetry_config: TelemetryConfig) -> EmitterResult<()> {
        self.ensure_idle()?;
        let telemetry = TelemetrySet::new(telemetry_config.clone())?;
        self.telemetry = Some(telemetry);
        self.telemetry_config = telemetry_config;
        Ok(())
    }

    /// Emitter settings in effect.
    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    /// Channel settings in effect.
    pub fn telemetry_config(&self) -> &TelemetryConfig {
        &self.telemetry_config
    }

    /// Owned telemetry set; `None` while running.
    pub fn telemetry(&self) -> Option<&TelemetrySet> {
        self.telemetry.as_ref()
    }

    /// Copies the emission counters.
    pub fn stats(&self) -> EmitterStats {
        self.stats.snapshot()
    }

    fn ensure_idle(&self) -> EmitterResult<()> {
        if self.is_running() {
            Err(EmitterError::Running)
        } else {
            Ok(())
        }
    }

    fn take_telemetry(&mut self) -> EmitterResult<TelemetrySet> {
        match self.telemetry.take() {
            Some(telemetry) => Ok(telemetry),
            None => Ok(TelemetrySet::new(self.telemetry_config.clone())?),
        }
    }
}

impl<C: PacketCodec> Drop for Emitter<C> {
    fn drop(&mut self) {
        self.stop();
    }
}
