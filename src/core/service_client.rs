// src/core/service_client.rs
//! HTTP client for the job board backend

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::core::config_manager::ApiConfig;
use crate::error::{BoardError, Result};
use crate::models::{CandidateApiResponse, JobApiResponse};

const JOBS_LIST_ENDPOINT: &str = "/api/jobs/get-list";
const CANDIDATE_BY_EMAIL_ENDPOINT: &str = "/api/candidate/get-by-email";
const APPLY_TO_JOB_ENDPOINT: &str = "/api/candidate/apply-to-job";

/// Body of `POST /api/candidate/apply-to-job`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyToJobRequest {
    pub uuid: String,
    pub job_id: String,
    pub candidate_id: String,
    pub repo_url: String,
}

/// Only a literal `"ok": true` accepts an application. A missing, null or
/// non-boolean `ok` is a rejection.
fn is_accepted(body: &Value) -> bool {
    body.get("ok") == Some(&Value::Bool(true))
}

/// Outcome of a candidate lookup. A 404 is an answer, not a failure.
#[derive(Debug)]
pub enum CandidateLookup {
    Found(CandidateApiResponse),
    NotFound,
}

#[derive(Debug, Clone)]
pub struct BoardClient {
    client: reqwest::Client,
    base_url: String,
}

impl BoardClient {
    /// Build a client for `base_url`, which must already be normalized.
    pub fn new(base_url: impl Into<String>, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// `None` when no base address is configured.
    pub fn from_config(config: &ApiConfig) -> Result<Option<Self>> {
        config
            .base_url
            .as_deref()
            .map(|base_url| Self::new(base_url, config.timeout_seconds))
            .transpose()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the open positions.
    pub async fn get_job_list(&self) -> Result<Vec<JobApiResponse>> {
        let url = format!("{}{}", self.base_url, JOBS_LIST_ENDPOINT);
        info!("Fetching job list: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!("Job list response status: {}", status);

        if !status.is_success() {
            warn!("Job list request failed with status {}", status);
            return Err(BoardError::status(status));
        }

        Self::decode(response).await
    }

    /// GET a candidate by email. The email is sent as given; callers trim it.
    pub async fn get_candidate_by_email(&self, email: &str) -> Result<CandidateLookup> {
        let url = format!(
            "{}{}?email={}",
            self.base_url,
            CANDIDATE_BY_EMAIL_ENDPOINT,
            urlencoding::encode(email)
        );
        info!("Looking up candidate: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        debug!("Candidate response status: {}", status);

        if status == StatusCode::NOT_FOUND {
            info!("No candidate for {}", email);
            return Ok(CandidateLookup::NotFound);
        }

        if !status.is_success() {
            warn!("Candidate lookup failed with status {}", status);
            return Err(BoardError::status(status));
        }

        Ok(CandidateLookup::Found(Self::decode(response).await?))
    }

    /// POST an application. Succeeds only on 2xx with `{ "ok": true }`.
    pub async fn apply_to_job(&self, request: &ApplyToJobRequest) -> Result<()> {
        let url = format!("{}{}", self.base_url, APPLY_TO_JOB_ENDPOINT);
        info!(
            "Submitting application for job {} with {}",
            request.job_id, request.repo_url
        );

        let response = self.client.post(&url).json(request).send().await?;
        let status = response.status();
        debug!("Apply response status: {}", status);

        if !status.is_success() {
            warn!("Application for job {} failed with status {}", request.job_id, status);
            return Err(BoardError::status(status));
        }

        let body: Value = Self::decode(response).await?;
        if !is_accepted(&body) {
            error!("Application for job {} was not accepted", request.job_id);
            return Err(BoardError::UnexpectedResponse);
        }

        Ok(())
    }

    async fn decode<R>(response: reqwest::Response) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode response: {}. Raw response: {}", e, body);
            BoardError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_request_is_camel_case() {
        let request = ApplyToJobRequest {
            uuid: "u-1".to_string(),
            job_id: "j-1".to_string(),
            candidate_id: "c-1".to_string(),
            repo_url: "https://github.com/alice/repo".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "uuid": "u-1",
                "jobId": "j-1",
                "candidateId": "c-1",
                "repoUrl": "https://github.com/alice/repo"
            })
        );
    }

    #[test]
    fn test_only_literal_true_is_accepted() {
        assert!(is_accepted(&serde_json::json!({ "ok": true })));

        for body in [
            serde_json::json!({}),
            serde_json::json!({ "ok": false }),
            serde_json::json!({ "ok": null }),
            serde_json::json!({ "ok": "true" }),
            serde_json::json!({ "ok": 1 }),
            serde_json::json!([true]),
        ] {
            assert!(!is_accepted(&body), "{} must be rejected", body);
        }
    }

    #[test]
    fn test_from_config_without_base_url() {
        let client = BoardClient::from_config(&ApiConfig::default()).unwrap();
        assert!(client.is_none());
    }
}
