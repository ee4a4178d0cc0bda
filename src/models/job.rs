// src/models/job.rs
use serde::{Deserialize, Serialize};

/// Raw job record as returned by `/api/jobs/get-list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobApiResponse {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosition {
    pub id: String,
    pub title: String,
}

impl From<JobApiResponse> for JobPosition {
    fn from(job: JobApiResponse) -> Self {
        Self {
            id: job.id,
            title: job.title,
        }
    }
}

/// Normalize a raw job list, preserving order.
pub fn build_job_position_list(jobs: Vec<JobApiResponse>) -> Vec<JobPosition> {
    jobs.into_iter().map(JobPosition::from).collect()
}
