//! Orchestrates the close-fixed-issues workflow for one trigger event.

use crate::eligibility::{self, Decision, SkipReason};
use crate::event::{EventError, TriggerEvent};
use crate::host::{FetchError, GithubHost, IssueHost};
use crate::reconcile::{reconcile_issues, ReconcileError};
use crate::references::collect_references;
use crate::summary::RunSummary;
use crate::templates::TemplateRenderer;
use octocrab::Octocrab;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration for running the fixed-issue closer.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// GitHub token used for API calls.
    token: String,
    /// Repository slug in "owner/repo" form.
    repository: String,
    /// Name of the event that triggered this run.
    event_name: String,
    /// Path to the JSON payload of the trigger event.
    event_path: PathBuf,
    /// Optional comment template posted on each closed issue.
    comment: Option<String>,
    /// Whether merges into the default branch are skipped.
    skip_default_branch: bool,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    ///
    /// The comment template starts unset and default-branch merges are
    /// skipped unless [`with_skip_default_branch`][Self::with_skip_default_branch]
    /// disables it.
    pub fn new(
        token: String,
        repository: String,
        event_name: String,
        event_path: PathBuf,
    ) -> Self {
        Self {
            token,
            repository,
            event_name,
            event_path,
            comment: None,
            skip_default_branch: true,
        }
    }

    /// Sets the comment template.
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    /// Sets whether default-branch merges are skipped.
    pub fn with_skip_default_branch(mut self, skip: bool) -> Self {
        self.skip_default_branch = skip;
        self
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Returns the repository slug.
    pub fn repository(&self) -> &str {
        &self.repository
    }

    /// Returns the trigger event name.
    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    /// Returns the trigger event payload path.
    pub fn event_path(&self) -> &Path {
        &self.event_path
    }

    /// Returns the comment template, if configured.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Returns whether default-branch merges are skipped.
    pub fn skip_default_branch(&self) -> bool {
        self.skip_default_branch
    }
}

/// Errors that can occur while running the closer.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The repository slug is not in "owner/repo" form.
    #[error("Invalid repository '{slug}', expected owner/repo")]
    InvalidRepository { slug: String },

    /// Trigger event loading errors.
    #[error(transparent)]
    Event(#[from] EventError),

    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),

    /// Repository metadata or commit list fetch errors.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Per-issue reconciliation errors.
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
}

/// Orchestrates a full close-fixed-issues run.
pub struct Runner {
    config: RunnerConfig,
    host: GithubHost,
    renderer: TemplateRenderer,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let (owner, repo) = split_repository(config.repository())?;

        let octocrab = Octocrab::builder()
            .personal_token(config.token.clone())
            .build()?;
        let host = GithubHost::new(octocrab, owner, repo);

        Ok(Self {
            config,
            host,
            renderer: TemplateRenderer::new(),
        })
    }

    /// Executes the full orchestration flow.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let event = TriggerEvent::load(self.config.event_name(), self.config.event_path())?;

        execute(
            &self.host,
            &event,
            self.config.comment(),
            self.config.skip_default_branch(),
            &self.renderer,
        )
        .await
    }
}

/// Runs the workflow against any host implementation.
///
/// Gate checks first, then reference collection, then reconciliation. Every
/// skip path returns a successful summary; the first external failure is
/// propagated to the caller.
pub async fn execute(
    host: &dyn IssueHost,
    event: &TriggerEvent,
    comment_template: Option<&str>,
    skip_default_branch: bool,
    renderer: &TemplateRenderer,
) -> Result<RunSummary, RunnerError> {
    debug!(
        event = %event.event_name,
        action = event.action.as_deref().unwrap_or("<none>"),
        "Inspecting trigger event"
    );

    if let Decision::Skip(reason) = eligibility::check_event(event) {
        info!(%reason, "Stepping out");
        return Ok(RunSummary::from_skip(reason));
    }

    let Some(pr) = event.pull_request.as_ref() else {
        // check_event already verified presence; kept as a graceful skip.
        return Ok(RunSummary::from_skip(SkipReason::MissingPullRequest));
    };

    let default_branch = host.default_branch().await?;
    debug!(%default_branch, base = %pr.base.branch, "Fetched repository metadata");

    if let Decision::Skip(reason) =
        eligibility::check_base_branch(pr, &default_branch, skip_default_branch)
    {
        info!(%reason, "Stepping out");
        return Ok(RunSummary::from_skip(reason));
    }

    let commit_messages = host.list_commit_messages(pr.number).await?;
    let issues = collect_references(pr.body.as_deref(), &commit_messages);

    let mut summary = RunSummary {
        issues_found: issues.len(),
        ..Default::default()
    };

    if issues.is_empty() {
        info!("Pull request fixes no issue");
        return Ok(summary);
    }

    info!(count = issues.len(), pr = pr.number, "Reconciling fixed issues");
    let reconciled =
        reconcile_issues(host, &issues, pr.number, comment_template, renderer).await?;

    for issue in &reconciled {
        summary.record(issue);
    }

    Ok(summary)
}

/// Splits an "owner/repo" slug into its two parts.
fn split_repository(slug: &str) -> Result<(String, String), RunnerError> {
    match slug.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(RunnerError::InvalidRepository {
            slug: slug.to_string(),
        }),
    }
}
