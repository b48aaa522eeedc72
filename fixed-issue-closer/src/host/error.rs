//! Host access error types.

use thiserror::Error;

/// Errors that can occur while reading state from the host platform.
#[derive(Debug, Error)]
pub enum FetchError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The referenced issue does not exist.
    #[error("Issue #{number} not found")]
    IssueNotFound { number: u64 },
}

/// Errors that can occur while writing state to the host platform.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// Permission denied.
    #[error("Permission denied: no write access to {owner}/{repo}")]
    PermissionDenied { owner: String, repo: String },
}
