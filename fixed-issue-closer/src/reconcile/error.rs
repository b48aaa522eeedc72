//! Reconciliation error types.

use crate::host::{FetchError, UpdateError};
use crate::templates::TemplateError;
use thiserror::Error;

/// Errors that can occur while reconciling an issue.
///
/// Any of these aborts the remaining batch; issues already closed or
/// commented on stay that way.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Reading issue state failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Closing or commenting failed.
    #[error(transparent)]
    Update(#[from] UpdateError),

    /// The comment template could not be rendered.
    #[error(transparent)]
    Template(#[from] TemplateError),
}
