// src/views/open_positions.rs
//! Job list with one independent application flow per job

use std::collections::HashMap;
use tracing::{debug, info, warn};

use crate::core::ApplyToJobRequest;
use crate::error::{BoardError, Result, ValidationError};
use crate::models::{JobPosition, User};
use crate::validation::is_public_github_repo_url;
use crate::views::render::{JobItem, PositionsSection, RenderedAlert, Trigger};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Application submitted successfully.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Error,
    Success,
}

/// Feedback for the last submission attempt on one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobAlert {
    pub kind: AlertKind,
    pub message: String,
}

impl JobAlert {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

/// Per-job input, alert and submitting flag, each keyed by job id. Clearing
/// an alert removes its entry.
#[derive(Debug, Default)]
pub struct OpenPositionsView {
    github_urls: HashMap<String, String>,
    job_alerts: HashMap<String, JobAlert>,
    is_submitting: HashMap<String, bool>,
}

impl OpenPositionsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn github_url(&self, job_id: &str) -> &str {
        self.github_urls.get(job_id).map(String::as_str).unwrap_or("")
    }

    pub fn alert(&self, job_id: &str) -> Option<&JobAlert> {
        self.job_alerts.get(job_id)
    }

    pub fn is_submitting(&self, job_id: &str) -> bool {
        self.is_submitting.get(job_id).copied().unwrap_or(false)
    }

    /// Store the URL typed for `job_id`. An error alert on that job is
    /// dropped; a success alert stays until the next submit.
    pub fn edit_url(&mut self, job_id: &str, value: impl Into<String>) {
        self.github_urls.insert(job_id.to_string(), value.into());

        if self.job_alerts.get(job_id).is_some_and(JobAlert::is_error) {
            self.job_alerts.remove(job_id);
        }
    }

    /// Validate and start a submission. Returns the payload to POST, or
    /// `None` after recording a validation alert.
    pub fn begin_submit(
        &mut self,
        job_id: &str,
        user: Option<&User>,
        api_base_url: Option<&str>,
    ) -> Option<ApplyToJobRequest> {
        match self.prepare_request(job_id, user, api_base_url) {
            Ok(request) => {
                debug!("Submitting application for job {}", job_id);
                self.is_submitting.insert(job_id.to_string(), true);
                self.job_alerts.remove(job_id);
                Some(request)
            }
            Err(err) => {
                debug!("Application for job {} rejected: {}", job_id, err);
                self.job_alerts
                    .insert(job_id.to_string(), JobAlert::error(err.to_string()));
                None
            }
        }
    }

    fn prepare_request(
        &self,
        job_id: &str,
        user: Option<&User>,
        api_base_url: Option<&str>,
    ) -> Result<ApplyToJobRequest> {
        let repo_url = self.github_url(job_id).trim();
        if repo_url.is_empty() {
            return Err(ValidationError::EmptyRepoUrl.into());
        }

        if !is_public_github_repo_url(repo_url) {
            return Err(ValidationError::InvalidRepoUrl.into());
        }

        let user = user.ok_or(ValidationError::NotLoggedIn)?;

        if api_base_url.is_none() {
            return Err(BoardError::MissingBaseUrl);
        }

        Ok(ApplyToJobRequest {
            uuid: user.uuid.clone(),
            job_id: job_id.to_string(),
            candidate_id: user.candidate_id.clone(),
            repo_url: repo_url.to_string(),
        })
    }

    /// Apply the outcome of a submission started with `begin_submit`.
    pub fn finish_submit(&mut self, job_id: &str, result: Result<()>) {
        let alert = match result {
            Ok(()) => {
                info!("Application for job {} submitted", job_id);
                JobAlert::success(SUBMIT_SUCCESS_MESSAGE)
            }
            Err(err) => {
                warn!("Application for job {} failed: {}", job_id, err);
                JobAlert::error(err.to_string())
            }
        };

        self.job_alerts.insert(job_id.to_string(), alert);
        self.is_submitting.insert(job_id.to_string(), false);
    }

    pub fn render(&self, jobs: &[JobPosition]) -> PositionsSection {
        if jobs.is_empty() {
            return PositionsSection::Empty;
        }

        let items = jobs
            .iter()
            .map(|job| {
                let submitting = self.is_submitting(&job.id);
                JobItem {
                    id: job.id.clone(),
                    title: job.title.clone(),
                    url_input: self.github_url(&job.id).to_string(),
                    submit: Trigger {
                        label: if submitting { "Submitting..." } else { "Submit" },
                        disabled: submitting,
                    },
                    alert: self.alert(&job.id).map(|alert| RenderedAlert {
                        kind: alert.kind,
                        message: alert.message.clone(),
                        role_alert: alert.is_error(),
                    }),
                }
            })
            .collect();

        PositionsSection::List(items)
    }
}
