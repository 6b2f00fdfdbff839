//! Streams synthetic vehicle telemetry to a visualization client over UDP.

mod settings;

use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use emitter::{Emitter, LogSink};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use transport::UdpTransport;

use crate::settings::{Overrides, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about = "Stream synthetic PAV telemetry over UDP")]
struct Args {
    /// JSON file with `emitter` and `telemetry` sections
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Destination host
    #[arg(long)]
    host: Option<String>,

    /// Destination UDP port
    #[arg(long)]
    port: Option<u16>,

    /// Milliseconds between packets
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,

    /// Packets per generated batch
    #[arg(long)]
    set_size: Option<usize>,

    /// Seed for a reproducible stream
    #[arg(long)]
    seed: Option<u64>,

    /// Log every packet as it is sent
    #[arg(short, long)]
    verbose: bool,

    /// Stop after this many seconds instead of waiting for Enter
    #[arg(long, value_name = "SECS", value_parser = parse_seconds)]
    duration: Option<Duration>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    settings.apply(Overrides {
        host: args.host,
        port: args.port,
        delay_ms: args.delay_ms,
        set_size: args.set_size,
        seed: args.seed,
        verbose: args.verbose,
    });

    if args.print_config {
        println!(
            "{}",
            serde_json::to_string_pretty(&settings).context("failed to render settings")?
        );
        return Ok(());
    }

    let transport = UdpTransport::bind_any().context("failed to open UDP socket")?;
    let mut emitter = Emitter::new(settings.emitter, settings.telemetry, Arc::new(transport))
        .context("invalid settings")?
        .with_packet_sink(Arc::new(LogSink));

    emitter.start().context("failed to start emitter")?;

    match args.duration {
        Some(duration) => thread::sleep(duration),
        None => {
            info!("streaming; press Enter to stop");
            let mut line = String::new();
            if let Err(err) = io::stdin().lock().read_line(&mut line) {
                warn!("stdin unavailable ({err}); stopping");
            }
        }
    }

    emitter.stop();
    let stats = emitter.stats();
    info!(
        "sent {} packets, {} failed ({} send, {} encode)",
        stats.sent,
        stats.failures(),
        stats.send_failures,
        stats.encode_failures
    );
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Ignore error if already set (e.g., during tests).
    let _ = fmt().with_env_filter(env_filter).try_init();
}

fn parse_seconds(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .parse()
        .with_context(|| format!("{raw:?} is not a number of seconds"))?;
    if !secs.is_finite() || secs <= 0.0 {
        bail!("duration must be a positive number of seconds");
    }
    Ok(Duration::from_secs_f64(secs))
}
