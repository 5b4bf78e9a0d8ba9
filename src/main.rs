use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

use derby::{ConsoleReporter, RaceConfig, RaceSupervisor};

/// Simulate a fixed-distance race between constant-speed racers
#[derive(Parser, Debug)]
#[command(name = "derby", version, about)]
struct Args {
    /// Track length in kilometres
    track_length: f64,

    /// Racer speeds in km/h, one per racer
    #[arg(required = true)]
    speeds: Vec<f64>,

    /// Racer tick granularity in milliseconds
    #[arg(long, default_value_t = 100)]
    update_interval_ms: u64,

    /// Reporting granularity in milliseconds
    #[arg(long, default_value_t = 1000)]
    display_interval_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::WARN)
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("failed to initialize logging");
    }

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "race aborted");
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = RaceConfig::builder()
        .update_interval(Duration::from_millis(args.update_interval_ms))
        .display_interval(Duration::from_millis(args.display_interval_ms))
        .build()
        .map_err(anyhow::Error::msg)
        .context("invalid race configuration")?;

    let supervisor = RaceSupervisor::new(config, Arc::new(ConsoleReporter))?;
    supervisor.run(args.track_length, &args.speeds).await?;
    Ok(())
}
