//! Reconciliation status types.

use serde::Serialize;

/// How the close transition for one issue turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseStatus {
    /// The issue was open and this run closed it.
    Closed,

    /// The issue was already closed; no transition was issued.
    AlreadyClosed,
}

/// Record of one reconciled issue.
#[derive(Debug, Clone)]
pub struct ReconciledIssue {
    /// Issue number.
    pub number: u64,

    /// Outcome of the close transition.
    pub status: CloseStatus,

    /// Whether a comment was posted.
    pub commented: bool,
}
