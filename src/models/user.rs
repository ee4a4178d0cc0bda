// src/models/user.rs
use serde::{Deserialize, Serialize};

/// Raw candidate record as returned by `/api/candidate/get-by-email`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateApiResponse {
    pub uuid: String,
    pub candidate_id: String,
    pub application_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// The identified candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: String,
    pub candidate_id: String,
    pub application_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<CandidateApiResponse> for User {
    fn from(candidate: CandidateApiResponse) -> Self {
        Self {
            uuid: candidate.uuid,
            candidate_id: candidate.candidate_id,
            application_id: candidate.application_id,
            first_name: candidate.first_name,
            last_name: candidate.last_name,
            email: candidate.email,
        }
    }
}

impl User {
    /// Full name for greetings, falling back to the email when both name
    /// fields are blank.
    pub fn display_name(&self) -> String {
        let full_name = format!("{} {}", self.first_name, self.last_name);
        let full_name = full_name.trim();
        if full_name.is_empty() {
            self.email.clone()
        } else {
            full_name.to_string()
        }
    }
}
