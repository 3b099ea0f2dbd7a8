//! Consumer demonstration loop
//!
//! Attaches to an existing channel and snapshots the record on every
//! cycle until Ctrl-C. Start the sender first — attaching to a channel
//! nobody created is an error, never an implicit creation.
//!
//! ```bash
//! cargo run --example receiver -- --name samples --interval-ms 20
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pulse::config::{ChannelConfig, ConfigLoader, LogLevel};
use pulse_shm::SampleChannel;

/// Pulse consumer - reads one sample record per cycle
#[derive(Parser, Debug)]
#[command(name = "receiver")]
#[command(version)]
#[command(about = "Reads sample records from a shared memory channel")]
struct Args {
    /// Channel name (must match the sender's)
    #[arg(short, long)]
    name: Option<String>,

    /// Poll period in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        error!("receiver failed: {}", e);
        eprintln!("receiver failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let config = ChannelConfig::load(path)?;
            config.validate()?;
            config
        }
        None => ChannelConfig::default(),
    };

    setup_tracing(config.log_level);

    let name = args.name.unwrap_or_else(|| config.channel.clone());
    let period = Duration::from_millis(
        args.interval_ms.unwrap_or(config.cadence.consumer_period_ms),
    );

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        info!("received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    let mut channel = SampleChannel::attach(&name)?;
    info!(channel = %name, period_ms = period.as_millis() as u64, "receiver started");

    while running.load(Ordering::SeqCst) {
        let record = channel.snapshot()?;

        let rendered: Vec<String> = record.values.iter().map(|v| v.to_string()).collect();
        println!("Received: {} @ {}", rendered.join(" "), record.timestamp_ms);

        std::thread::sleep(period);
    }

    info!("receiver stopping, leaving channel resources in place");
    Ok(())
}

fn setup_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
