// src/views/candidate_lookup.rs
//! Root view: candidate identification, job list loading and the session

use tracing::{debug, info, warn};

use crate::core::{ApplyToJobRequest, CandidateLookup};
use crate::error::{BoardError, Result, ValidationError};
use crate::models::{build_job_position_list, JobApiResponse, JobPosition, SessionState, User};
use crate::views::open_positions::OpenPositionsView;
use crate::views::render::{CandidateAlert, Header, JobsSection, Page, Trigger};

/// Handle for an in-flight job-list load. Stale once the view unmounts or
/// mounts again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobsLoad {
    generation: u64,
}

/// An in-flight candidate lookup for an already trimmed email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub email: String,
}

#[derive(Debug)]
pub struct CandidateLookupView {
    api_base_url: Option<String>,
    session: SessionState,
    user: Option<User>,
    email_input: String,
    jobs: Vec<JobPosition>,
    jobs_error: Option<String>,
    is_jobs_loading: bool,
    error: Option<String>,
    is_candidate_not_found: bool,
    is_loading: bool,
    mounted: bool,
    generation: u64,
    positions: OpenPositionsView,
}

impl CandidateLookupView {
    /// The current user starts as whatever `session` already holds.
    pub fn new(api_base_url: Option<String>, session: SessionState) -> Self {
        let user = session.current().cloned();
        Self {
            api_base_url,
            session,
            user,
            email_input: String::new(),
            jobs: Vec::new(),
            jobs_error: None,
            is_jobs_loading: false,
            error: None,
            is_candidate_not_found: false,
            is_loading: false,
            mounted: false,
            generation: 0,
            positions: OpenPositionsView::new(),
        }
    }

    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url.as_deref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn email_input(&self) -> &str {
        &self.email_input
    }

    pub fn jobs(&self) -> &[JobPosition] {
        &self.jobs
    }

    pub fn jobs_error(&self) -> Option<&str> {
        self.jobs_error.as_deref()
    }

    pub fn is_jobs_loading(&self) -> bool {
        self.is_jobs_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_candidate_not_found(&self) -> bool {
        self.is_candidate_not_found
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn positions(&self) -> &OpenPositionsView {
        &self.positions
    }

    /// Mount the view. Returns the job-list load to perform, or `None` when
    /// no base address is configured.
    pub fn mount(&mut self) -> Option<JobsLoad> {
        self.mounted = true;
        self.generation += 1;

        if self.api_base_url.is_none() {
            warn!("No base URL configured, job list not requested");
            self.jobs_error = Some(BoardError::MissingBaseUrl.to_string());
            return None;
        }

        self.is_jobs_loading = true;
        self.jobs_error = None;
        Some(JobsLoad {
            generation: self.generation,
        })
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.generation += 1;
    }

    /// Apply a job-list result. Returns `false` when the result was stale and
    /// discarded.
    pub fn finish_jobs_load(
        &mut self,
        load: JobsLoad,
        result: Result<Vec<JobApiResponse>>,
    ) -> bool {
        if !self.mounted || load.generation != self.generation {
            debug!("Discarding job list result from generation {}", load.generation);
            return false;
        }

        match result {
            Ok(raw) => {
                info!("Loaded {} open positions", raw.len());
                self.jobs = build_job_position_list(raw);
            }
            Err(err) => {
                warn!("Failed to load job list: {}", err);
                self.jobs_error = Some(err.to_string());
            }
        }
        self.is_jobs_loading = false;
        true
    }

    /// An error on screen is dismissed as soon as the user types again.
    pub fn set_email_input(&mut self, value: impl Into<String>) {
        self.email_input = value.into();
        if self.error.is_some() {
            self.error = None;
            self.is_candidate_not_found = false;
        }
    }

    /// Validate and start a lookup. Does not refuse while another lookup is
    /// in flight; callers honor the disabled trigger.
    pub fn begin_lookup(&mut self) -> Option<LookupRequest> {
        let email = self.email_input.trim().to_string();

        let precondition = if self.api_base_url.is_none() {
            Some(BoardError::MissingBaseUrl)
        } else if email.is_empty() {
            Some(ValidationError::EmptyEmail.into())
        } else {
            None
        };

        if let Some(err) = precondition {
            self.error = Some(err.to_string());
            self.is_candidate_not_found = false;
            return None;
        }

        self.is_loading = true;
        self.error = None;
        self.is_candidate_not_found = false;
        Some(LookupRequest { email })
    }

    pub fn finish_lookup(&mut self, request: LookupRequest, result: Result<CandidateLookup>) {
        let outcome = result.and_then(|lookup| match lookup {
            CandidateLookup::Found(candidate) => Ok(User::from(candidate)),
            CandidateLookup::NotFound => Err(BoardError::CandidateNotFound {
                email: request.email.clone(),
            }),
        });

        match outcome {
            Ok(user) => {
                info!("Candidate identified: {}", user.email);
                self.session.set_user(user.clone());
                self.email_input = user.email.clone();
                self.user = Some(user);
            }
            Err(err) => {
                if err.is_not_found() {
                    info!("{}", err);
                } else {
                    warn!("Candidate lookup for {} failed: {}", request.email, err);
                }
                self.is_candidate_not_found = err.is_not_found();
                self.error = Some(err.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Forget the candidate. The job list is kept.
    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            info!("Logging out {}", user.email);
        }
        self.session.clear();
        self.user = None;
        self.error = None;
        self.is_candidate_not_found = false;
    }

    pub fn edit_url(&mut self, job_id: &str, value: impl Into<String>) {
        self.positions.edit_url(job_id, value);
    }

    pub fn begin_submit(&mut self, job_id: &str) -> Option<ApplyToJobRequest> {
        self.positions
            .begin_submit(job_id, self.user.as_ref(), self.api_base_url.as_deref())
    }

    pub fn finish_submit(&mut self, job_id: &str, result: Result<()>) {
        self.positions.finish_submit(job_id, result);
    }

    /// Find a listed job by id or by its 1-based position.
    pub fn resolve_job(&self, key: &str) -> Option<&JobPosition> {
        self.jobs.iter().find(|job| job.id == key).or_else(|| {
            key.parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| self.jobs.get(index))
        })
    }

    pub fn lookup_trigger(&self) -> Trigger {
        Trigger {
            label: if self.is_loading {
                "Loading..."
            } else {
                "Load candidate"
            },
            disabled: self.is_loading,
        }
    }

    pub fn render(&self) -> Page {
        let header = match &self.user {
            Some(user) => Header::Greeting {
                text: format!("Hi, {}", user.display_name()),
                logout: Trigger {
                    label: "Logout",
                    disabled: false,
                },
            },
            None => Header::EmailForm {
                email_input: self.email_input.clone(),
                lookup: self.lookup_trigger(),
            },
        };

        let alert = self.error.as_ref().map(|message| CandidateAlert {
            not_found: self.is_candidate_not_found,
            message: message.clone(),
        });

        let jobs = if self.is_jobs_loading {
            JobsSection::Loading
        } else if let Some(message) = &self.jobs_error {
            JobsSection::Error(message.clone())
        } else {
            JobsSection::Positions(self.positions.render(&self.jobs))
        };

        Page {
            header,
            alert,
            jobs,
        }
    }
}
