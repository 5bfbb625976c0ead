use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use worksheet::{app::Route, config::Config};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backend base URL (overrides WORKSHEET_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds (overrides WORKSHEET_TIMEOUT_SECS)
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// File to write logs to (overrides WORKSHEET_LOG_FILE)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// View to open on start
    #[arg(long, value_enum, default_value_t = Route::Tasks)]
    route: Route,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_overrides(args.api_url, args.timeout_secs, args.log_file)?;

    // The terminal belongs to the UI, so logs go to a file.
    let log_file = File::create(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worksheet=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    info!(
        api_url = %config.api_url,
        timeout = ?config.request_timeout,
        "Loaded configuration"
    );

    worksheet::run(&config, args.route).await?;
    Ok(())
}
