#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod eligibility;
pub mod event;
pub mod host;
pub mod reconcile;
pub mod references;
pub mod runner;
pub mod summary;
pub mod templates;

pub use eligibility::{check_base_branch, check_event, Decision, SkipReason, ACCEPTED_EVENTS};
pub use event::{BaseRef, EventError, PullRequestInfo, TriggerEvent};
pub use host::{FetchError, GithubHost, IssueHost, IssueState, UpdateError};
pub use reconcile::{reconcile_issues, CloseStatus, ReconcileError, ReconciledIssue};
pub use references::{collect_references, scan_closing_references};
pub use runner::{execute, Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
pub use templates::{TemplateError, TemplateRenderer};
