//! Issue state reconciliation.
//!
//! Brings every referenced issue to the closed state and optionally posts a
//! templated comment. Issues are processed strictly one at a time so that
//! processing order matches discovery order and the first failure aborts the
//! remainder of the batch.

mod error;
mod status;

pub use error::ReconcileError;
pub use status::{CloseStatus, ReconciledIssue};

use crate::host::IssueHost;
use crate::templates::TemplateRenderer;
use tracing::{debug, info, info_span, Instrument};

/// Reconciles each referenced issue in sequence.
///
/// For every issue number: fetch the current state, close the issue if it is
/// still open, then post the rendered comment when a non-empty template is
/// configured. Re-running against an already-closed issue skips the close
/// transition; the comment step is not deduplicated across runs, so a rerun
/// with a template configured posts a duplicate comment.
///
/// # Arguments
///
/// * `host` - Host platform access
/// * `issues` - Deduplicated issue numbers, in discovery order
/// * `pr_number` - Number of the merged pull request, for the template
/// * `comment_template` - Optional comment template with a `{{pr}}` variable
/// * `renderer` - Template renderer
///
/// # Errors
///
/// Returns [`ReconcileError`] on the first fetch, update, or template
/// failure. Issues processed before the failure keep their new state.
pub async fn reconcile_issues(
    host: &dyn IssueHost,
    issues: &[u64],
    pr_number: u64,
    comment_template: Option<&str>,
    renderer: &TemplateRenderer,
) -> Result<Vec<ReconciledIssue>, ReconcileError> {
    let template = comment_template.filter(|t| !t.is_empty());
    let mut reconciled = Vec::with_capacity(issues.len());

    for &number in issues {
        let issue = reconcile_issue(host, number, pr_number, template, renderer).await?;
        reconciled.push(issue);
    }

    Ok(reconciled)
}

/// Reconciles a single issue: check, close if open, comment if configured.
async fn reconcile_issue(
    host: &dyn IssueHost,
    number: u64,
    pr_number: u64,
    template: Option<&str>,
    renderer: &TemplateRenderer,
) -> Result<ReconciledIssue, ReconcileError> {
    let span = info_span!("reconcile_issue", issue = number);

    async {
        let state = host.get_issue(number).await?;

        let status = if state.closed {
            debug!("Issue already closed, skipping close transition");
            CloseStatus::AlreadyClosed
        } else {
            host.close_issue(number).await?;
            info!("Issue closed");
            CloseStatus::Closed
        };

        let mut commented = false;
        if let Some(template) = template {
            let body = renderer.render_comment(template, pr_number)?;
            info!("Commenting on issue");
            host.create_comment(number, &body).await?;
            commented = true;
        }

        Ok(ReconciledIssue {
            number,
            status,
            commented,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeHost, HostCall};

    #[tokio::test]
    async fn closes_open_issue_and_comments() {
        let host = FakeHost::new("main", &[(12, false)]);
        let renderer = TemplateRenderer::new();

        let reconciled = reconcile_issues(
            &host,
            &[12],
            42,
            Some("Closed by pull request #{{pr}}."),
            &renderer,
        )
        .await
        .unwrap();

        assert_eq!(reconciled.len(), 1);
        assert_eq!(reconciled[0].status, CloseStatus::Closed);
        assert!(reconciled[0].commented);
        assert!(host.issue_closed(12));

        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 12 },
                HostCall::CloseIssue { number: 12 },
                HostCall::CreateComment {
                    number: 12,
                    body: "Closed by pull request #42.".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn already_closed_issue_skips_close_but_still_comments() {
        let host = FakeHost::new("main", &[(7, true)]);
        let renderer = TemplateRenderer::new();

        let reconciled = reconcile_issues(&host, &[7], 42, Some("Done."), &renderer)
            .await
            .unwrap();

        assert_eq!(reconciled[0].status, CloseStatus::AlreadyClosed);
        assert!(reconciled[0].commented);

        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 7 },
                HostCall::CreateComment {
                    number: 7,
                    body: "Done.".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn no_template_means_no_comment() {
        let host = FakeHost::new("main", &[(3, false)]);
        let renderer = TemplateRenderer::new();

        let reconciled = reconcile_issues(&host, &[3], 42, None, &renderer)
            .await
            .unwrap();

        assert!(!reconciled[0].commented);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 3 },
                HostCall::CloseIssue { number: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn empty_template_is_treated_as_unset() {
        let host = FakeHost::new("main", &[(3, false)]);
        let renderer = TemplateRenderer::new();

        let reconciled = reconcile_issues(&host, &[3], 42, Some(""), &renderer)
            .await
            .unwrap();

        assert!(!reconciled[0].commented);
    }

    #[tokio::test]
    async fn failed_close_aborts_before_the_next_issue() {
        let host = FakeHost::new("main", &[(1, false), (2, false)]).with_failing_close(1);
        let renderer = TemplateRenderer::new();

        let result = reconcile_issues(&host, &[1, 2], 42, Some("Done."), &renderer).await;

        assert!(matches!(result, Err(ReconcileError::Update(_))));
        // Nothing at all was attempted for issue 2.
        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 1 },
                HostCall::CloseIssue { number: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn failed_comment_aborts_after_the_close() {
        let host = FakeHost::new("main", &[(1, false), (2, false)]).with_failing_comment(1);
        let renderer = TemplateRenderer::new();

        let result = reconcile_issues(&host, &[1, 2], 42, Some("Done."), &renderer).await;

        assert!(matches!(result, Err(ReconcileError::Update(_))));
        // The close already went through and is not rolled back.
        assert!(host.issue_closed(1));
        assert!(!host.issue_closed(2));
    }

    #[tokio::test]
    async fn missing_issue_is_a_fetch_error() {
        let host = FakeHost::new("main", &[]);
        let renderer = TemplateRenderer::new();

        let result = reconcile_issues(&host, &[404], 42, None, &renderer).await;
        assert!(matches!(result, Err(ReconcileError::Fetch(_))));
    }

    #[tokio::test]
    async fn malformed_template_fails_after_the_close() {
        let host = FakeHost::new("main", &[(5, false)]);
        let renderer = TemplateRenderer::new();

        let result = reconcile_issues(&host, &[5], 42, Some("{{pr"), &renderer).await;

        assert!(matches!(result, Err(ReconcileError::Template(_))));
        // The close transition for this issue already happened.
        assert!(host.issue_closed(5));
        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 5 },
                HostCall::CloseIssue { number: 5 },
            ]
        );
    }

    #[tokio::test]
    async fn rerun_performs_no_additional_close() {
        let host = FakeHost::new("main", &[(12, false)]);
        let renderer = TemplateRenderer::new();

        reconcile_issues(&host, &[12], 42, None, &renderer)
            .await
            .unwrap();
        let reconciled = reconcile_issues(&host, &[12], 42, None, &renderer)
            .await
            .unwrap();

        assert_eq!(reconciled[0].status, CloseStatus::AlreadyClosed);
        let close_calls = host
            .calls()
            .into_iter()
            .filter(|c| matches!(c, HostCall::CloseIssue { .. }))
            .count();
        assert_eq!(close_calls, 1);
    }

    #[tokio::test]
    async fn processes_issues_in_the_order_given() {
        let host = FakeHost::new("main", &[(9, false), (2, false)]);
        let renderer = TemplateRenderer::new();

        let reconciled = reconcile_issues(&host, &[9, 2], 42, None, &renderer)
            .await
            .unwrap();

        let numbers: Vec<_> = reconciled.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![9, 2]);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::GetIssue { number: 9 },
                HostCall::CloseIssue { number: 9 },
                HostCall::GetIssue { number: 2 },
                HostCall::CloseIssue { number: 2 },
            ]
        );
    }
}
