//! Review findings.
//!
//! A [`Finding`] is one comment handed to the review platform. It is built
//! once by a rule and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// How the review platform surfaces a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational comment
    Message,
    /// Advisory warning, does not block the merge
    Warn,
    /// Blocking failure
    Fail,
}

impl Severity {
    /// Whether this severity should fail the build.
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Fail)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Message => write!(f, "message"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Rule that produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// Release notes edited without the translation catalog
    ReleaseNotesWithoutTranslation,
    /// Translatable string resource referencing another resource
    StringResourceReference,
    /// Data model edited on a PR into a release branch
    DataModelOnReleaseBranch,
    /// Dependency pinned to a commit hash
    CommitPinnedDependency,
    /// PR carries the release label
    ReleaseLabel,
    /// Generated localization file edited outside a release
    GeneratedStringsEdited,
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReleaseNotesWithoutTranslation => write!(f, "release_notes_without_translation"),
            Self::StringResourceReference => write!(f, "string_resource_reference"),
            Self::DataModelOnReleaseBranch => write!(f, "data_model_on_release_branch"),
            Self::CommitPinnedDependency => write!(f, "commit_pinned_dependency"),
            Self::ReleaseLabel => write!(f, "release_label"),
            Self::GeneratedStringsEdited => write!(f, "generated_strings_edited"),
        }
    }
}

/// A single review comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub severity: Severity,
    pub kind: FindingKind,
    /// Markdown text shown to the reviewer
    pub message: String,
}

impl Finding {
    pub fn new(severity: Severity, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            severity,
            kind,
            message: message.into(),
        }
    }

    pub fn message(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Message, kind, message)
    }

    pub fn warn(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, kind, message)
    }

    pub fn fail(kind: FindingKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Fail, kind, message)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
