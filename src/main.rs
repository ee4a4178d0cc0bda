use anyhow::{Context, Result};
use clap::Parser;
use job_board::cli::{handle_command, BoardCommand, Cli};
use job_board::ConfigManager;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConfigManager::load(&cli.config, cli.base_url.as_deref())?;

    // Logs go to a file so they never interleave with the page
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&config.logging.file)
        .with_context(|| {
            format!(
                "Failed to open log file {}",
                config.logging.file.display()
            )
        })?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting job board client");
    config.log_summary();

    let command = cli.command.unwrap_or(BoardCommand::Interactive);
    handle_command(command, &config).await
}
