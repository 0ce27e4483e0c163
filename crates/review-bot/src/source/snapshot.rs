//! JSON snapshot source.
//!
//! CI jobs that already fetched PR data from the hosting platform dump it into
//! a single JSON document:
//!
//! ```json
//! {
//!   "base_ref": "trunk",
//!   "head_ref": "feature/x",
//!   "labels": ["Releases"],
//!   "modified": ["fastlane/metadata/release_notes.txt"],
//!   "created": [],
//!   "deleted": [],
//!   "diffs": { "app/src/main/res/values/strings.xml": "--- a/...\n+++ b/...\n+..." },
//!   "files": { "Podfile.lock": "DEPENDENCIES:\n  - ..." }
//! }
//! ```
//!
//! Every field is optional. A diff entry is either a unified diff or the
//! added text of the file on its own; unified diffs are recognised by their
//! hunk headers.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use pr_policy::{ChangeSet, PrMetadata};
use serde::{Deserialize, Serialize};

use super::{PullRequestSource, SourceError};

/// Everything a review run needs, prefetched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PrSnapshot {
    #[serde(flatten)]
    pub metadata: PrMetadata,
    #[serde(flatten)]
    pub changes: ChangeSet,
    /// Unified diff per path
    pub diffs: HashMap<String, String>,
    /// File contents at the PR head per path
    pub files: HashMap<String, String>,
}

impl PrSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Serves a [`PrSnapshot`] held in memory.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: PrSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: PrSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot document from disk.
    pub async fn load(path: &Path) -> Result<Self, SourceError> {
        let json = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(PrSnapshot::from_json(&json)?))
    }
}

#[async_trait]
impl PullRequestSource for SnapshotSource {
    async fn change_set(&self) -> Result<ChangeSet, SourceError> {
        Ok(self.snapshot.changes.clone())
    }

    async fn metadata(&self) -> Result<PrMetadata, SourceError> {
        Ok(self.snapshot.metadata.clone())
    }

    async fn diff_for_file(&self, path: &str) -> Result<Option<String>, SourceError> {
        Ok(self.snapshot.diffs.get(path).cloned())
    }

    async fn file_contents(&self, path: &str) -> Result<Option<String>, SourceError> {
        Ok(self.snapshot.files.get(path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_json() {
        let snapshot = PrSnapshot::from_json(
            r#"{
                "base_ref": "release/24.1",
                "head_ref": "fix/crash",
                "labels": ["Releases"],
                "modified": ["a.txt"],
                "deleted": ["b.txt"],
                "files": {"Podfile.lock": "DEPENDENCIES:\n"}
            }"#,
        )
        .unwrap();
        assert_eq!(snapshot.metadata.base_ref, "release/24.1");
        assert_eq!(snapshot.metadata.labels, vec!["Releases"]);
        assert_eq!(snapshot.changes.modified, vec!["a.txt"]);
        assert!(snapshot.changes.created.is_empty());
        assert_eq!(snapshot.changes.deleted, vec!["b.txt"]);
        assert!(snapshot.diffs.is_empty());
        assert!(snapshot.files.contains_key("Podfile.lock"));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = PrSnapshot::from_json("{}").unwrap();
        assert!(snapshot.changes.is_empty());
        assert_eq!(snapshot.metadata, PrMetadata::default());
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            PrSnapshot::from_json("not json"),
            Err(SourceError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_source_missing_entries() {
        let source = SnapshotSource::new(PrSnapshot::default());
        assert_eq!(source.diff_for_file("x").await.unwrap(), None);
        assert_eq!(source.file_contents("Podfile.lock").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_snapshot_source_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pr.json");
        std::fs::write(&path, r#"{"head_ref": "release/1.0"}"#).unwrap();

        let source = SnapshotSource::load(&path).await.unwrap();
        assert_eq!(source.metadata().await.unwrap().head_ref, "release/1.0");
    }
}
