//! Change-set classification.
//!
//! Answers yes/no questions about which conventionally named files a pull
//! request touched and which branches and labels it carries. Every predicate
//! is a pure function of its inputs; missing data reads as `false`.

use serde::{Deserialize, Serialize};

use crate::platform::PlatformProfile;

/// Paths changed by a pull request, partitioned by change type.
///
/// A path appears in at most one partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeSet {
    pub modified: Vec<String>,
    pub created: Vec<String>,
    pub deleted: Vec<String>,
}

impl ChangeSet {
    /// Union of all partitions: modified, then created, then deleted.
    pub fn all_paths(&self) -> impl Iterator<Item = &str> {
        self.modified
            .iter()
            .chain(&self.created)
            .chain(&self.deleted)
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.created.is_empty() && self.deleted.is_empty()
    }

    pub fn release_notes_changed(&self, profile: &PlatformProfile) -> bool {
        self.modified
            .iter()
            .any(|p| p.ends_with(&profile.release_notes_suffix))
    }

    pub fn translation_file_changed(&self, profile: &PlatformProfile) -> bool {
        self.modified
            .iter()
            .any(|p| p.contains(&profile.translation_catalog_marker))
    }

    /// Whether any path in any partition lies inside a data model package.
    pub fn data_model_changed(&self, profile: &PlatformProfile) -> bool {
        match profile.data_model_marker.as_deref() {
            Some(marker) => self.all_paths().any(|p| p.contains(marker)),
            None => false,
        }
    }

    /// Whether the generated localization file was edited by hand.
    pub fn generated_strings_changed(&self, profile: &PlatformProfile) -> bool {
        match profile.generated_strings_suffix.as_deref() {
            Some(suffix) => self.modified.iter().any(|p| p.ends_with(suffix)),
            None => false,
        }
    }

    /// Modified string resource files whose diffs need scanning, in PR order.
    pub fn string_resource_files<'a>(&'a self, profile: &PlatformProfile) -> Vec<&'a str> {
        match profile.string_resource_suffix.as_deref() {
            Some(suffix) => self
                .modified
                .iter()
                .filter(|p| p.ends_with(suffix))
                .map(String::as_str)
                .collect(),
            None => Vec::new(),
        }
    }
}

/// Branch and label metadata of a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrMetadata {
    /// Branch the PR merges into
    pub base_ref: String,
    /// Branch the PR merges from
    pub head_ref: String,
    /// Label names
    pub labels: Vec<String>,
}

/// An empty prefix or marker matches nothing.
impl PrMetadata {
    pub fn targets_release_branch(&self, profile: &PlatformProfile) -> bool {
        is_release_branch(&self.base_ref, profile)
    }

    pub fn is_on_release_branch(&self, profile: &PlatformProfile) -> bool {
        is_release_branch(&self.head_ref, profile)
    }

    pub fn has_release_label(&self, profile: &PlatformProfile) -> bool {
        let marker = &profile.release_label_marker;
        !marker.is_empty() && self.labels.iter().any(|l| l.contains(marker.as_str()))
    }
}

fn is_release_branch(branch: &str, profile: &PlatformProfile) -> bool {
    let prefix = &profile.release_branch_prefix;
    !prefix.is_empty() && branch.starts_with(prefix.as_str())
}
