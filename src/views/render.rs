// src/views/render.rs
//! View models produced by the views, and their terminal rendering

use std::fmt;

use crate::views::open_positions::AlertKind;

pub const URL_PLACEHOLDER: &str = "https://github.com/your-username/your-repo";

/// A clickable control. A disabled trigger must not be activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedAlert {
    pub kind: AlertKind,
    pub message: String,
    /// Only error alerts are announced as alerts.
    pub role_alert: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobItem {
    pub id: String,
    pub title: String,
    pub url_input: String,
    pub submit: Trigger,
    pub alert: Option<RenderedAlert>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionsSection {
    Empty,
    List(Vec<JobItem>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    Greeting { text: String, logout: Trigger },
    EmailForm { email_input: String, lookup: Trigger },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAlert {
    pub not_found: bool,
    pub message: String,
}

/// Exactly one of these is shown for the job section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobsSection {
    Loading,
    Error(String),
    Positions(PositionsSection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub header: Header,
    pub alert: Option<CandidateAlert>,
    pub jobs: JobsSection,
}

impl Page {
    pub fn greeting(&self) -> Option<&str> {
        match &self.header {
            Header::Greeting { text, .. } => Some(text),
            Header::EmailForm { .. } => None,
        }
    }

    pub fn job_items(&self) -> &[JobItem] {
        match &self.jobs {
            JobsSection::Positions(PositionsSection::List(items)) => items,
            _ => &[],
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.disabled {
            write!(f, "[{} (disabled)]", self.label)
        } else {
            write!(f, "[{}]", self.label)
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.header {
            Header::Greeting { text, logout } => writeln!(f, "{}  {}", text, logout)?,
            Header::EmailForm {
                email_input,
                lookup,
            } => {
                let shown = if email_input.is_empty() {
                    "<Enter email>"
                } else {
                    email_input.as_str()
                };
                writeln!(f, "Candidate email: {}  {}", shown, lookup)?;
            }
        }

        if let Some(alert) = &self.alert {
            if alert.not_found {
                writeln!(f, "! **Candidate not found.** {}", alert.message)?;
            } else {
                writeln!(f, "! {}", alert.message)?;
            }
        }

        writeln!(f)?;
        match &self.jobs {
            JobsSection::Loading => writeln!(f, "Loading open positions...")?,
            JobsSection::Error(message) => writeln!(f, "! {}", message)?,
            JobsSection::Positions(section) => write!(f, "{}", section)?,
        }

        Ok(())
    }
}

impl fmt::Display for PositionsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Open positions")?;

        let items = match self {
            PositionsSection::Empty => return writeln!(f, "No open positions available."),
            PositionsSection::List(items) => items,
        };

        for (index, item) in items.iter().enumerate() {
            writeln!(f, "{:>3}. {} ({})", index + 1, item.title, item.id)?;

            let url = if item.url_input.is_empty() {
                format!("<{}>", URL_PLACEHOLDER)
            } else {
                item.url_input.clone()
            };
            writeln!(f, "     GitHub URL: {}  {}", url, item.submit)?;

            if let Some(alert) = &item.alert {
                let marker = if alert.role_alert { "!" } else { "✓" };
                writeln!(f, "     {} {}", marker, alert.message)?;
            }
        }

        Ok(())
    }
}
