//! Audit log for flow commands.
//!
//! Completed commands append one event to an NDJSON file (one JSON object per
//! line), by default `~/.flow/events.ndjson`.
//!
//! # Event Format
//!
//! Each event is a JSON object with the following fields:
//! - `ts`: RFC3339 timestamp
//! - `action`: The action performed (checkout, branch, clone, commit, etc.)
//! - `actor`: The owner string (e.g., `user@HOST`)
//! - `repo`: Optional repository path the action ran in
//! - `details`: Freeform object with action-specific details
//!
//! Recording is best-effort: [`record_event`] prints a warning on failure and
//! never fails the command that produced the event.

use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// Branch resolved and checked out (`gitCheckout`)
    Checkout,
    /// Branch created or switched from the clipboard
    Branch,
    /// Repository cloned
    Clone,
    /// Commit created
    Commit,
    /// Current branch pushed
    Push,
    /// Audio extracted with yt-dlp
    YoutubeToSound,
    /// Go upgrade script ran
    UpdateGo,
    /// `task install-flow` ran
    InstallFlow,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::Checkout => write!(f, "checkout"),
            EventAction::Branch => write!(f, "branch"),
            EventAction::Clone => write!(f, "clone"),
            EventAction::Commit => write!(f, "commit"),
            EventAction::Push => write!(f, "push"),
            EventAction::YoutubeToSound => write!(f, "youtube_to_sound"),
            EventAction::UpdateGo => write!(f, "update_go"),
            EventAction::InstallFlow => write!(f, "install_flow"),
        }
    }
}

/// An event record for the audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// RFC3339 timestamp when the event occurred.
    pub ts: DateTime<Utc>,

    /// The action that was performed.
    pub action: EventAction,

    /// The actor who performed the action (e.g., `user@HOST`).
    pub actor: String,

    /// Repository the action ran in, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// Freeform details object with action-specific information.
    pub details: Value,
}

impl Event {
    /// Create a new event with the given action.
    ///
    /// The timestamp is set to the current time, and the actor is
    /// determined from the environment (USER@HOSTNAME).
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            repo: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the repository path for this event.
    pub fn with_repo(mut self, repo: &Path) -> Self {
        self.repo = Some(repo.display().to_string());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| FlowError::UserError(format!("failed to serialize event to JSON: {}", e)))
    }
}

/// Get the actor string for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event to the NDJSON file at `events_file`.
///
/// The file and its parent directory are created if they don't exist. Each
/// append results in one line with a trailing newline.
pub fn append_event(events_file: &Path, event: &Event) -> Result<()> {
    let json_line = event.to_ndjson_line()?;

    if let Some(events_dir) = events_file.parent()
        && !events_dir.as_os_str().is_empty()
        && !events_dir.exists()
    {
        fs::create_dir_all(events_dir).map_err(|e| {
            FlowError::UserError(format!(
                "failed to create events directory '{}': {}",
                events_dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(events_file)
        .map_err(|e| {
            FlowError::UserError(format!(
                "failed to open events file '{}': {}",
                events_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        FlowError::UserError(format!(
            "failed to write event to '{}': {}",
            events_file.display(),
            e
        ))
    })?;

    Ok(())
}

/// Record an event for a completed command, if event logging is enabled.
///
/// Failures are reported as a warning on stderr and otherwise ignored.
pub fn record_event(ctx: &FlowContext, event: Event) {
    if !ctx.config.events_enabled {
        return;
    }

    let events_file = ctx.events_file();
    if let Err(e) = append_event(&events_file, &event) {
        eprintln!("Warning: failed to record {} event: {}", event.action, e);
    } else {
        log::debug!("recorded {} event in {}", event.action, events_file.display());
    }
}
