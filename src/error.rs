// src/error.rs
//! Error taxonomy for the job board. The `Display` text of every variant is
//! the exact message shown to the user.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

/// Input rejected before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an email")]
    EmptyEmail,

    #[error("Please enter your GitHub repository URL.")]
    EmptyRepoUrl,

    #[error("Please enter a valid public GitHub repository URL.")]
    InvalidRepoUrl,

    #[error("You are not logged in. Please login before applying.")]
    NotLoggedIn,
}

#[derive(Debug, Error)]
pub enum BoardError {
    /// No base API address was configured.
    #[error("Missing BASE_URL in .env")]
    MissingBaseUrl,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Candidate lookup answered 404.
    #[error("No candidate found for \"{email}\".")]
    CandidateNotFound { email: String },

    /// Any non-2xx status other than a lookup 404.
    #[error("Request failed with status {status}")]
    Status { status: u16 },

    /// Network-level failure; carries the underlying message.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The body of a 2xx response could not be decoded.
    #[error("{0}")]
    Decode(String),

    /// Well-formed 2xx whose payload signals failure.
    #[error("Unexpected API response")]
    UnexpectedResponse,
}

impl BoardError {
    pub fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CandidateNotFound { .. })
    }

    /// HTTP status carried by this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::CandidateNotFound { .. } => Some(404),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
