//! Job board client: identify a candidate by email, list open positions and
//! apply to them with a public GitHub repository.

pub mod app;
pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod validation;
pub mod views;

pub use crate::core::{BoardClient, ConfigManager};
pub use crate::error::{BoardError, ValidationError};
pub use crate::models::{JobPosition, SessionState, User};
pub use crate::validation::is_public_github_repo_url;
pub use crate::views::CandidateLookupView;
