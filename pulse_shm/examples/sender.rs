//! Producer demonstration loop
//!
//! Creates the channel (this side is the creator), then publishes
//! `counter + i` into all ten samples on every cycle until Ctrl-C.
//!
//! ```bash
//! cargo run --example sender -- --name samples --interval-ms 100
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pulse::config::{ChannelConfig, ConfigLoader, LogLevel};
use pulse::consts::SAMPLE_COUNT;
use pulse_shm::SampleChannel;

/// Pulse producer - writes one sample record per cycle
#[derive(Parser, Debug)]
#[command(name = "sender")]
#[command(version)]
#[command(about = "Publishes sample records into a shared memory channel")]
struct Args {
    /// Channel name (all OS-visible names are derived from it)
    #[arg(short, long)]
    name: Option<String>,

    /// Write period in milliseconds
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        error!("sender failed: {}", e);
        eprintln!("sender failed: {}", e);
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
        args.interval_ms.unwrap_or(config.cadence.producer_period_ms),
    );

    let running = Arc::new(AtomicBool::new(true));
    let flag = running.clone();
    ctrlc::set_handler(move || {
        info!("received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    let mut channel = SampleChannel::create(&name)?;
    info!(channel = %name, period_ms = period.as_millis() as u64, "sender started");

    let mut counter = 0.0f32;
    while running.load(Ordering::SeqCst) {
        let mut values = [0.0f32; SAMPLE_COUNT];
        for (i, value) in values.iter_mut().enumerate() {
            *value = counter + i as f32;
        }
        let timestamp_ms = unix_time_ms();

        channel.publish(values, timestamp_ms)?;

        let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        println!("Sent: {}", rendered.join(" "));

        counter += 1.0;
        std::thread::sleep(period);
    }

    info!("sender stopping, channel resources will be removed");
    Ok(())
}

fn unix_time_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

fn setup_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
