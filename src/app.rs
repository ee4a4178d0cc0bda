// src/app.rs
//! Single-threaded event loop: user commands and network completions are
//! applied to the views one at a time, in arrival order.

use anyhow::Context;
use std::future::Future;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::core::{ApiConfig, ApplyToJobRequest, BoardClient, CandidateLookup};
use crate::error::Result;
use crate::models::JobApiResponse;
use crate::views::{CandidateLookupView, JobsLoad, LookupRequest, Page};

pub const HELP: &str = "\
Commands:
  email <address>        type into the candidate email field
  lookup                 load the candidate for the typed email
  logout                 forget the current candidate
  url <job> <repo-url>   type the GitHub repository URL for a job (number or id)
  submit <job>           apply to a job with its repository URL
  show                   redraw the page
  help                   show this help
  quit                   leave";

/// A finished network request, tagged with what started it.
#[derive(Debug)]
pub enum Completion {
    Jobs(JobsLoad, Result<Vec<JobApiResponse>>),
    Lookup(LookupRequest, Result<CandidateLookup>),
    Apply(String, Result<()>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Email(String),
    Lookup,
    Logout,
    Url { job: String, value: String },
    Submit { job: String },
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command: {0}. Type `help` for the list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("No open position matches \"{0}\"")]
    UnknownJob(String),

    #[error("{0}")]
    Unavailable(&'static str),
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> std::result::Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        let command = match verb.to_lowercase().as_str() {
            "email" => Self::Email(rest.to_string()),
            "lookup" | "load" => Self::Lookup,
            "logout" => Self::Logout,
            "url" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("url <job> <repo-url>"));
                }
                let (job, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(job, value)| (job, value.trim()))
                    .unwrap_or((rest, ""));
                Self::Url {
                    job: job.to_string(),
                    value: value.to_string(),
                }
            }
            "submit" | "apply" => {
                if rest.is_empty() {
                    return Err(CommandError::Usage("submit <job>"));
                }
                Self::Submit {
                    job: rest.to_string(),
                }
            }
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_string())),
        };

        Ok(Some(command))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    view: CandidateLookupView,
    client: Option<BoardClient>,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl App {
    /// The client is built from the view's own base address, so a request
    /// the view issues always has a client to go through.
    pub fn new(view: CandidateLookupView, timeout_seconds: Option<u64>) -> Result<Self> {
        let client = BoardClient::from_config(&ApiConfig {
            base_url: view.api_base_url().map(str::to_string),
            timeout_seconds,
        })?;

        let (tx, rx) = mpsc::unbounded_channel();
        Ok(Self {
            view,
            client,
            tx,
            rx,
            in_flight: 0,
        })
    }

    pub fn view(&self) -> &CandidateLookupView {
        &self.view
    }

    pub fn render(&self) -> Page {
        self.view.render()
    }

    /// Requests started but not yet applied.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn mount(&mut self) {
        // The view only returns a load when a base address is configured
        if let (Some(load), Some(client)) = (self.view.mount(), self.client.clone()) {
            self.spawn(async move { Completion::Jobs(load, client.get_job_list().await) });
        }
    }

    /// Tear the page down. Job-list results still in flight are dropped when
    /// they arrive.
    pub fn unmount(&mut self) {
        self.view.unmount();
    }

    pub fn apply(&mut self, command: Command) -> std::result::Result<Flow, CommandError> {
        match command {
            Command::Email(value) => {
                self.require_logged_out()?;
                self.view.set_email_input(value);
            }
            Command::Lookup => {
                self.require_logged_out()?;
                if self.view.lookup_trigger().disabled {
                    debug!("Lookup already in flight, ignoring");
                } else if let Some(request) = self.view.begin_lookup() {
                    self.start_lookup(request);
                }
            }
            Command::Logout => {
                if self.view.user().is_none() {
                    return Err(CommandError::Unavailable("Not logged in."));
                }
                self.view.logout();
            }
            Command::Url { job, value } => {
                let job_id = self.job_id(&job)?;
                self.view.edit_url(&job_id, value);
            }
            Command::Submit { job } => {
                let job_id = self.job_id(&job)?;
                if self.view.positions().is_submitting(&job_id) {
                    debug!("Job {} already submitting, ignoring", job_id);
                } else if let Some(request) = self.view.begin_submit(&job_id) {
                    self.start_apply(job_id, request);
                }
            }
            Command::Show | Command::Help => {}
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    pub fn apply_completion(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::Jobs(load, result) => {
                self.view.finish_jobs_load(load, result);
            }
            Completion::Lookup(request, result) => self.view.finish_lookup(request, result),
            Completion::Apply(job_id, result) => self.view.finish_submit(&job_id, result),
        }
    }

    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.rx.recv().await
    }

    /// Apply completions until nothing is in flight.
    pub async fn settle(&mut self) {
        while self.in_flight > 0 {
            match self.rx.recv().await {
                Some(completion) => self.apply_completion(completion),
                None => break,
            }
        }
    }

    fn require_logged_out(&self) -> std::result::Result<(), CommandError> {
        if self.view.user().is_some() {
            return Err(CommandError::Unavailable(
                "Already logged in. Use `logout` first.",
            ));
        }
        Ok(())
    }

    fn job_id(&self, key: &str) -> std::result::Result<String, CommandError> {
        self.view
            .resolve_job(key)
            .map(|job| job.id.clone())
            .ok_or_else(|| CommandError::UnknownJob(key.to_string()))
    }

    fn start_lookup(&mut self, request: LookupRequest) {
        if let Some(client) = self.client.clone() {
            self.spawn(async move {
                let result = client.get_candidate_by_email(&request.email).await;
                Completion::Lookup(request, result)
            });
        }
    }

    fn start_apply(&mut self, job_id: String, request: ApplyToJobRequest) {
        if let Some(client) = self.client.clone() {
            self.spawn(async move {
                let result = client.apply_to_job(&request).await;
                Completion::Apply(job_id, result)
            });
        }
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: Future<Output = Completion> + Send + 'static,
    {
        let tx = self.tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            if tx.send(task.await).is_err() {
                debug!("Event loop gone, dropping completion");
            }
        });
    }
}

/// Interactive session on stdin/stdout. Returns when the user quits or
/// stdin closes.
pub async fn run_interactive(app: &mut App) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.mount();
    println!("{}\n", HELP);
    println!("{}", app.render());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(None) => continue,
                    Ok(Some(Command::Help)) => println!("{}", HELP),
                    Ok(Some(command)) => match app.apply(command) {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => println!("{}", app.render()),
                        Err(err) => println!("{}", err),
                    },
                    Err(err) => println!("{}", err),
                }
            }
            Some(completion) = app.next_completion() => {
                app.apply_completion(completion);
                println!("{}", app.render());
            }
        }
    }

    app.unmount();
    info!("Interactive session ended");
    Ok(())
}
