//! Access to the issue-tracking host platform.
//!
//! The workflow consumes the host through the [`IssueHost`] capability trait
//! so the reconciliation logic stays independent of the GitHub client. The
//! production implementation is [`GithubHost`]; tests use an in-memory fake.

mod error;
mod github;

#[cfg(test)]
pub(crate) mod fake;

pub use error::{FetchError, UpdateError};
pub use github::GithubHost;

use async_trait::async_trait;

/// Current state of an issue on the host platform.
#[derive(Debug, Clone)]
pub struct IssueState {
    /// Issue number.
    pub number: u64,

    /// Whether the issue is closed.
    pub closed: bool,
}

/// Capabilities the workflow needs from the host platform.
///
/// All operations are awaited strictly in sequence by the callers; no
/// implementation needs to support concurrent use within a run.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Returns the repository's default branch name.
    async fn default_branch(&self) -> Result<String, FetchError>;

    /// Lists the commit messages of a pull request, in API order.
    async fn list_commit_messages(&self, pr_number: u64) -> Result<Vec<String>, FetchError>;

    /// Fetches the current state of an issue.
    async fn get_issue(&self, number: u64) -> Result<IssueState, FetchError>;

    /// Transitions an issue to closed.
    async fn close_issue(&self, number: u64) -> Result<(), UpdateError>;

    /// Posts a new comment on an issue.
    async fn create_comment(&self, number: u64, body: &str) -> Result<(), UpdateError>;
}
