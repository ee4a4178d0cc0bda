// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::app::{run_interactive, App, Command};
use crate::core::config_manager::DEFAULT_CONFIG_PATH;
use crate::core::ConfigManager;
use crate::models::SessionState;
use crate::views::CandidateLookupView;

#[derive(Parser)]
#[command(name = "job-board")]
#[command(about = "Browse open positions and apply with a GitHub repository")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<BoardCommand>,

    /// Backend address; overrides BASE_URL and the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// Interactive session (default)
    Interactive,
    /// List open positions
    Jobs,
    /// Look up a candidate by email
    Lookup { email: String },
    /// Look up a candidate and apply to one job
    Apply {
        email: String,
        /// Job number as listed, or job id
        job: String,
        repo_url: String,
    },
}

pub async fn handle_command(command: BoardCommand, config: &ConfigManager) -> Result<()> {
    let view = CandidateLookupView::new(config.api.base_url.clone(), SessionState::new());
    let mut app = App::new(view, config.api.timeout_seconds)?;

    match command {
        BoardCommand::Interactive => return run_interactive(&mut app).await,

        BoardCommand::Jobs => {
            app.mount();
            app.settle().await;
            println!("{}", app.render());
            if let Some(error) = app.view().jobs_error() {
                anyhow::bail!("Failed to load open positions: {}", error);
            }
        }

        BoardCommand::Lookup { email } => {
            app.mount();
            lookup(&mut app, email).await?;
            println!("{}", app.render());
        }

        BoardCommand::Apply {
            email,
            job,
            repo_url,
        } => {
            app.mount();
            lookup(&mut app, email).await?;

            app.apply(Command::Url {
                job: job.clone(),
                value: repo_url,
            })?;
            app.apply(Command::Submit { job: job.clone() })?;
            app.settle().await;
            println!("{}", app.render());

            let job_id = app
                .view()
                .resolve_job(&job)
                .map(|j| j.id.clone())
                .unwrap_or(job);
            match app.view().positions().alert(&job_id) {
                Some(alert) if !alert.is_error() => {
                    info!("Application for job {} submitted", job_id);
                }
                Some(alert) => anyhow::bail!("Application not submitted: {}", alert.message),
                None => anyhow::bail!("Application not submitted"),
            }
        }
    }

    app.unmount();
    Ok(())
}

/// Type the email, look the candidate up and wait for every pending request.
async fn lookup(app: &mut App, email: String) -> Result<()> {
    app.apply(Command::Email(email))?;
    app.apply(Command::Lookup)?;
    app.settle().await;

    if app.view().user().is_none() {
        println!("{}", app.render());
        let reason = app.view().error().unwrap_or("Candidate not loaded");
        anyhow::bail!("Candidate lookup failed: {}", reason);
    }
    Ok(())
}
