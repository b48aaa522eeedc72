//! GitHub-backed host implementation.

use super::{FetchError, IssueHost, IssueState, UpdateError};
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::debug;

/// Host access backed by the GitHub REST API for a single repository.
pub struct GithubHost {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

/// One entry of the pull request commit listing.
#[derive(Debug, Deserialize)]
struct CommitListEntry {
    commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

impl GithubHost {
    /// Creates a host for `owner/repo` using an authenticated client.
    pub fn new(octocrab: Octocrab, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// Maps write failures, surfacing permission problems explicitly.
    fn map_update_error(&self, error: octocrab::Error) -> UpdateError {
        if is_permission_denied_message(&error.to_string()) {
            UpdateError::PermissionDenied {
                owner: self.owner.clone(),
                repo: self.repo.clone(),
            }
        } else {
            UpdateError::GitHubError(error)
        }
    }
}

#[async_trait]
impl IssueHost for GithubHost {
    async fn default_branch(&self) -> Result<String, FetchError> {
        let repo = self.octocrab.repos(&self.owner, &self.repo).get().await?;
        Ok(repo.default_branch.unwrap_or_else(|| "main".to_string()))
    }

    async fn list_commit_messages(&self, pr_number: u64) -> Result<Vec<String>, FetchError> {
        let route = format!(
            "/repos/{}/{}/pulls/{}/commits",
            self.owner, self.repo, pr_number
        );
        let entries: Vec<CommitListEntry> = self.octocrab.get(route, None::<&()>).await?;

        debug!(pr = pr_number, count = entries.len(), "Fetched commit list");
        Ok(entries
            .into_iter()
            .map(|entry| entry.commit.message)
            .collect())
    }

    async fn get_issue(&self, number: u64) -> Result<IssueState, FetchError> {
        match self
            .octocrab
            .issues(&self.owner, &self.repo)
            .get(number)
            .await
        {
            Ok(issue) => Ok(IssueState {
                number,
                closed: matches!(issue.state, octocrab::models::IssueState::Closed),
            }),
            Err(e) if is_not_found(&e) => Err(FetchError::IssueNotFound { number }),
            Err(e) => Err(e.into()),
        }
    }

    async fn close_issue(&self, number: u64) -> Result<(), UpdateError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .update(number)
            .state(octocrab::models::IssueState::Closed)
            .send()
            .await
            .map_err(|e| self.map_update_error(e))?;

        Ok(())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), UpdateError> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(number, body)
            .await
            .map_err(|e| self.map_update_error(e))?;

        Ok(())
    }
}

/// Checks if an error is a 404 from the GitHub API.
fn is_not_found(error: &octocrab::Error) -> bool {
    matches!(error, octocrab::Error::GitHub { source, .. } if source.status_code.as_u16() == 404)
}

/// Checks if an error message indicates permission denied.
fn is_permission_denied_message(message: &str) -> bool {
    let msg = message.to_lowercase();
    msg.contains("403") || msg.contains("forbidden") || msg.contains("permission")
}
