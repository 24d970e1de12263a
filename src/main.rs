use std::{io::Write as _, process::ExitCode, time::Duration};

use anyhow::{Context as _, Result};
use clap::{error::ErrorKind, Parser};
use tracing_subscriber::EnvFilter;

use youtube_channel_metrics::{
    metrics::{bare_handle, DEFAULT_RECENT_VIDEOS},
    youtube::{self, DEFAULT_BASE_URL},
    ChannelMetrics, ChannelMetricsFetcher,
};

/// Prints public statistics of a YouTube channel as a single JSON object.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Channel handle, without the "@" prefix.
    #[arg(value_parser = parse_handle)]
    handle: String,

    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: String,

    #[arg(long, env = "YOUTUBE_API_BASE_URL", default_value = DEFAULT_BASE_URL)]
    api_base_url: String,

    /// Number of most recent uploads to average over.
    #[arg(long, default_value_t = DEFAULT_RECENT_VIDEOS, value_parser = clap::value_parser!(u32).range(1..=50))]
    recent_videos: u32,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Fail instead of reporting zero averages when recent videos can't be fetched.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

fn parse_handle(raw: &str) -> Result<String, String> {
    match bare_handle(raw) {
        "" => Err("handle must not be empty".to_string()),
        handle => Ok(handle.to_string()),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn write_metrics(metrics: &ChannelMetrics) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer(&mut stdout, metrics)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

async fn run(args: Args) -> Result<bool> {
    let client = youtube::Client::new(
        args.api_key,
        args.api_base_url,
        Duration::from_secs(args.timeout),
    )
    .context("failed to build YouTube client")?;

    let fetcher = ChannelMetricsFetcher::new(client)
        .recent_videos(args.recent_videos)
        .strict(args.strict);

    let Some(metrics) = fetcher.fetch_channel_metrics(&args.handle).await else {
        return Ok(false);
    };

    write_metrics(&metrics)?;

    Ok(true)
}

#[tokio::main]
async fn main() -> ExitCode {
    simple_env_load::load_env_from([".env"]);

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
            _ => {
                let _ = error.print();
                return ExitCode::FAILURE;
            }
        },
    };

    init_tracing();

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            tracing::error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}
