//! Trigger event types and payload loading.
//!
//! A run is driven by a single GitHub webhook event, delivered by the Actions
//! runtime as an event name plus a JSON payload file. The event is parsed once
//! at startup and never mutated afterwards.

mod error;

pub use error::EventError;

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The event that triggered this run.
#[derive(Debug, Clone)]
pub struct TriggerEvent {
    /// Event name as reported by the host (e.g. "pull_request").
    pub event_name: String,

    /// Payload action (e.g. "closed"), when the event carries one.
    pub action: Option<String>,

    /// The pull request the event refers to, when present.
    pub pull_request: Option<PullRequestInfo>,
}

/// Read-only view of the pull request being merged.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestInfo {
    /// Pull request number.
    pub number: u64,

    /// Whether the pull request was merged (as opposed to closed unmerged).
    #[serde(default)]
    pub merged: bool,

    /// Pull request description, if one was written.
    pub body: Option<String>,

    /// The branch the pull request merges into.
    pub base: BaseRef,
}

/// Base branch reference of a pull request.
#[derive(Debug, Clone, Deserialize)]
pub struct BaseRef {
    /// Branch name (the payload calls this field `ref`).
    #[serde(rename = "ref")]
    pub branch: String,
}

/// On-disk shape of the webhook payload. Only the fields this tool
/// inspects are modeled; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
struct EventPayload {
    action: Option<String>,
    pull_request: Option<PullRequestInfo>,
}

impl TriggerEvent {
    /// Loads a trigger event from an event name and a payload file.
    ///
    /// # Arguments
    ///
    /// * `event_name` - Event name from the host environment
    /// * `payload_path` - Path to the JSON payload file
    ///
    /// # Errors
    ///
    /// Returns [`EventError`] if the file can't be read or the JSON is malformed.
    pub fn load(event_name: &str, payload_path: &Path) -> Result<Self, EventError> {
        debug!(event = event_name, path = %payload_path.display(), "Loading event payload");

        let raw = std::fs::read_to_string(payload_path).map_err(|e| EventError::IoError {
            path: payload_path.display().to_string(),
            source: e,
        })?;

        let payload: EventPayload =
            serde_json::from_str(&raw).map_err(|e| EventError::JsonError {
                path: payload_path.display().to_string(),
                source: e,
            })?;

        Ok(Self {
            event_name: event_name.to_string(),
            action: payload.action,
            pull_request: payload.pull_request,
        })
    }
}
