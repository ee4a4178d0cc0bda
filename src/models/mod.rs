// src/models/mod.rs
//! Normalized in-memory records built from backend payloads

pub mod job;
pub mod session;
pub mod user;

pub use job::{build_job_position_list, JobApiResponse, JobPosition};
pub use session::SessionState;
pub use user::{CandidateApiResponse, User};
