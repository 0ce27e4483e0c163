//! Local git source.
//!
//! Reads PR data from a checkout that has both the base and head refs
//! fetched. Branch names and labels are not stored in git, so they are
//! supplied by the caller.

use std::path::PathBuf;

use async_trait::async_trait;
use pr_policy::{ChangeSet, PrMetadata};
use tracing::debug;

use super::{PullRequestSource, SourceError};

/// Shells out to `git` in a working directory.
#[derive(Debug, Clone)]
pub struct GitSource {
    repo: PathBuf,
    base: String,
    head: String,
    labels: Vec<String>,
}

impl GitSource {
    pub fn new(repo: impl Into<PathBuf>, base: &str, head: &str, labels: Vec<String>) -> Self {
        Self {
            repo: repo.into(),
            base: base.to_string(),
            head: head.to_string(),
            labels,
        }
    }

    fn range(&self) -> String {
        format!("{}...{}", self.base, self.head)
    }

    async fn git(&self, args: &[&str]) -> Result<std::process::Output, SourceError> {
        let output = tokio::process::Command::new("git")
            .args(args)
            .current_dir(&self.repo)
            .output()
            .await?;
        Ok(output)
    }
}

/// Parse `git diff --name-status` output into a change set.
///
/// Status letters other than `A` and `D` count as modifications.
pub fn parse_name_status(output: &str) -> ChangeSet {
    let mut changes = ChangeSet::default();
    for line in output.lines() {
        let mut fields = line.split('\t');
        let (Some(status), Some(path)) = (fields.next(), fields.next()) else {
            continue;
        };
        let path = path.to_string();
        match status.chars().next() {
            Some('A') => changes.created.push(path),
            Some('D') => changes.deleted.push(path),
            Some(_) => changes.modified.push(path),
            None => {}
        }
    }
    changes
}

#[async_trait]
impl PullRequestSource for GitSource {
    async fn change_set(&self) -> Result<ChangeSet, SourceError> {
        let range = self.range();
        let output = self
            .git(&["diff", "--name-status", "--no-renames", range.as_str()])
            .await?;
        if !output.status.success() {
            return Err(SourceError::Git {
                operation: format!("diff --name-status {range}"),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(parse_name_status(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn metadata(&self) -> Result<PrMetadata, SourceError> {
        Ok(PrMetadata {
            base_ref: self.base.clone(),
            head_ref: self.head.clone(),
            labels: self.labels.clone(),
        })
    }

    async fn diff_for_file(&self, path: &str) -> Result<Option<String>, SourceError> {
        let range = self.range();
        let output = self.git(&["diff", range.as_str(), "--", path]).await?;
        if !output.status.success() {
            return Err(SourceError::Git {
                operation: format!("diff {range} -- {path}"),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let diff = String::from_utf8_lossy(&output.stdout).to_string();
        Ok((!diff.trim().is_empty()).then_some(diff))
    }

    async fn file_contents(&self, path: &str) -> Result<Option<String>, SourceError> {
        let object = format!("{}:{}", self.head, path);
        let output = self.git(&["show", object.as_str()]).await?;
        if !output.status.success() {
            debug!(
                path,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "file not present at head"
            );
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).to_string()))
    }
}
