// src/views/mod.rs
//! View state machines. Each user action or network completion is applied
//! through a method; network work itself happens in `crate::app`.

pub mod candidate_lookup;
pub mod open_positions;
pub mod render;

pub use candidate_lookup::{CandidateLookupView, JobsLoad, LookupRequest};
pub use open_positions::{AlertKind, JobAlert, OpenPositionsView};
pub use render::Page;
