//! Pull-request data sources.
//!
//! The review platform owns how changed files, diffs, file contents, and
//! metadata are fetched. [`PullRequestSource`] is the seam: the runner awaits
//! one call at a time and treats `Ok(None)` as "no data".

pub mod git;
pub mod snapshot;

use async_trait::async_trait;
use pr_policy::{ChangeSet, PrMetadata};
use thiserror::Error;

pub use git::GitSource;
pub use snapshot::{PrSnapshot, SnapshotSource};

/// Errors raised while fetching PR data.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A git invocation exited unsuccessfully
    #[error("git {operation} failed: {stderr}")]
    Git { operation: String, stderr: String },
}

/// Read-only access to one pull request.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// Paths changed by the PR.
    async fn change_set(&self) -> Result<ChangeSet, SourceError>;

    /// Branch names and labels.
    async fn metadata(&self) -> Result<PrMetadata, SourceError>;

    /// Unified diff of one file, or `None` when the file has no diff.
    async fn diff_for_file(&self, path: &str) -> Result<Option<String>, SourceError>;

    /// Contents of a file at the PR head, or `None` when it does not exist.
    async fn file_contents(&self, path: &str) -> Result<Option<String>, SourceError>;
}
