//! Precondition checks deciding whether the workflow runs at all.
//!
//! The checks form an ordered chain that short-circuits on the first miss,
//! each miss producing its own skip reason. A skip is a normal, successful
//! termination, never an error.

use crate::event::{PullRequestInfo, TriggerEvent};

/// Event kinds this workflow responds to.
///
/// `pull_request_target` is accepted alongside `pull_request` because it is
/// the usual way to grant a write-capable token to workflows triggered by
/// merges of forked pull requests.
pub const ACCEPTED_EVENTS: [&str; 2] = ["pull_request", "pull_request_target"];

/// Outcome of an eligibility check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// All checks passed, the workflow should run.
    Proceed,

    /// A precondition failed, the workflow steps out.
    Skip(SkipReason),
}

impl Decision {
    /// Returns true if the decision is [`Proceed`][`Decision::Proceed`].
    #[must_use]
    pub fn is_proceed(&self) -> bool {
        matches!(self, Decision::Proceed)
    }
}

/// Why the workflow stepped out without doing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The triggering event is not a pull request event.
    UnsupportedEvent { event_name: String },

    /// The pull request action is not "closed".
    NotClosedAction { action: Option<String> },

    /// The event payload carries no pull request.
    MissingPullRequest,

    /// The pull request was closed without being merged.
    NotMerged,

    /// The pull request merged into the default branch, which the host
    /// platform already handles by closing linked issues itself.
    DefaultBranchMerge { branch: String },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedEvent { event_name } => {
                write!(f, "event '{event_name}' is not a pull request event")
            }
            Self::NotClosedAction { action } => {
                write!(
                    f,
                    "pull request action is '{}', not 'closed'",
                    action.as_deref().unwrap_or("<none>")
                )
            }
            Self::MissingPullRequest => write!(f, "event payload has no pull request"),
            Self::NotMerged => write!(f, "pull request was closed without merging"),
            Self::DefaultBranchMerge { branch } => {
                write!(
                    f,
                    "base branch '{branch}' is the default branch, the host closes linked issues itself"
                )
            }
        }
    }
}

/// Evaluates the event-shape preconditions (kind, action, presence, merge).
///
/// The checks run in order and the first miss wins:
/// 1. event kind must be in [`ACCEPTED_EVENTS`]
/// 2. action must be "closed"
/// 3. a pull request must be present in the payload
/// 4. the pull request must be merged
///
/// The default-branch check runs separately via [`check_base_branch`] once
/// repository metadata is available.
#[must_use]
pub fn check_event(event: &TriggerEvent) -> Decision {
    if !ACCEPTED_EVENTS.contains(&event.event_name.as_str()) {
        return Decision::Skip(SkipReason::UnsupportedEvent {
            event_name: event.event_name.clone(),
        });
    }

    if event.action.as_deref() != Some("closed") {
        return Decision::Skip(SkipReason::NotClosedAction {
            action: event.action.clone(),
        });
    }

    let Some(pr) = &event.pull_request else {
        return Decision::Skip(SkipReason::MissingPullRequest);
    };

    if !pr.merged {
        return Decision::Skip(SkipReason::NotMerged);
    }

    Decision::Proceed
}

/// Evaluates the default-branch precondition.
///
/// Merges into the default branch are skipped unless `skip_default_branch`
/// was explicitly disabled, since the host platform already closes issues
/// linked from such merges.
#[must_use]
pub fn check_base_branch(
    pr: &PullRequestInfo,
    default_branch: &str,
    skip_default_branch: bool,
) -> Decision {
    if pr.base.branch == default_branch && skip_default_branch {
        return Decision::Skip(SkipReason::DefaultBranchMerge {
            branch: pr.base.branch.clone(),
        });
    }

    Decision::Proceed
}
