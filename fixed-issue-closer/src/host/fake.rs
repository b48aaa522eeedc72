//! In-memory fake host for tests.
//!
//! Satisfies the [`IssueHost`] contract without touching the network and
//! records every call so tests can assert exact call sequences.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchError, IssueHost, IssueState, UpdateError};

/// A host API call observed by [`FakeHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    DefaultBranch,
    ListCommits { pr: u64 },
    GetIssue { number: u64 },
    CloseIssue { number: u64 },
    CreateComment { number: u64, body: String },
}

/// In-memory issue host backed by a `HashMap<number, closed>`.
pub struct FakeHost {
    default_branch: String,
    commit_messages: Vec<String>,
    issues: Mutex<HashMap<u64, bool>>,
    calls: Mutex<Vec<HostCall>>,
    fail_close_on: Option<u64>,
    fail_comment_on: Option<u64>,
}

impl FakeHost {
    /// Creates a fake host with the given issues as `(number, closed)` pairs.
    pub fn new(default_branch: &str, issues: &[(u64, bool)]) -> Self {
        Self {
            default_branch: default_branch.to_string(),
            commit_messages: Vec::new(),
            issues: Mutex::new(issues.iter().copied().collect()),
            calls: Mutex::new(Vec::new()),
            fail_close_on: None,
            fail_comment_on: None,
        }
    }

    pub fn with_commit_messages(mut self, messages: &[&str]) -> Self {
        self.commit_messages = messages.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Makes `close_issue` fail for the given issue number.
    pub fn with_failing_close(mut self, number: u64) -> Self {
        self.fail_close_on = Some(number);
        self
    }

    /// Makes `create_comment` fail for the given issue number.
    pub fn with_failing_comment(mut self, number: u64) -> Self {
        self.fail_comment_on = Some(number);
        self
    }

    /// Returns every call made so far, in order.
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Returns whether the given issue is currently closed.
    pub fn issue_closed(&self, number: u64) -> bool {
        *self.issues.lock().unwrap().get(&number).unwrap_or(&false)
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn denied(&self) -> UpdateError {
        UpdateError::PermissionDenied {
            owner: "test".to_string(),
            repo: "repo".to_string(),
        }
    }
}

#[async_trait]
impl IssueHost for FakeHost {
    async fn default_branch(&self) -> Result<String, FetchError> {
        self.record(HostCall::DefaultBranch);
        Ok(self.default_branch.clone())
    }

    async fn list_commit_messages(&self, pr_number: u64) -> Result<Vec<String>, FetchError> {
        self.record(HostCall::ListCommits { pr: pr_number });
        Ok(self.commit_messages.clone())
    }

    async fn get_issue(&self, number: u64) -> Result<IssueState, FetchError> {
        self.record(HostCall::GetIssue { number });
        let issues = self.issues.lock().unwrap();
        match issues.get(&number) {
            Some(&closed) => Ok(IssueState { number, closed }),
            None => Err(FetchError::IssueNotFound { number }),
        }
    }

    async fn close_issue(&self, number: u64) -> Result<(), UpdateError> {
        self.record(HostCall::CloseIssue { number });
        if self.fail_close_on == Some(number) {
            return Err(self.denied());
        }
        self.issues.lock().unwrap().insert(number, true);
        Ok(())
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), UpdateError> {
        self.record(HostCall::CreateComment {
            number,
            body: body.to_string(),
        });
        if self.fail_comment_on == Some(number) {
            return Err(self.denied());
        }
        Ok(())
    }
}
