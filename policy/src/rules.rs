//! Review rules.
//!
//! Each rule turns classified PR data into at most one finding with a fixed
//! severity and message. The string-resource rule lives in
//! [`crate::diff_scan`] because it yields one finding per offending line.
//!
//! | Rule | Severity |
//! |---|---|
//! | release notes without translation catalog | warn |
//! | data model edited into a release branch | warn |
//! | commit-pinned dependency | fail |
//! | release label present | message |
//! | generated strings edited outside a release | warn |

use crate::change_set::{ChangeSet, PrMetadata};
use crate::finding::{Finding, FindingKind};
use crate::platform::PlatformProfile;

/// Release notes changed but the translation catalog did not.
pub fn release_notes_without_translation(
    changes: &ChangeSet,
    profile: &PlatformProfile,
) -> Option<Finding> {
    if changes.release_notes_changed(profile) && !changes.translation_file_changed(profile) {
        Some(Finding::warn(
            FindingKind::ReleaseNotesWithoutTranslation,
            format!(
                "The {} file must be updated any time changes are made to release notes",
                profile.translation_catalog_name()
            ),
        ))
    } else {
        None
    }
}

/// A data model was touched by a PR into a release branch.
pub fn data_model_on_release_branch(
    changes: &ChangeSet,
    meta: &PrMetadata,
    profile: &PlatformProfile,
) -> Option<Finding> {
    if meta.targets_release_branch(profile) && changes.data_model_changed(profile) {
        Some(Finding::warn(
            FindingKind::DataModelOnReleaseBranch,
            "Core Data: Do not edit an existing Core Data model in a release branch unless it \
             hasn't been released to testers yet. Instead create a new model version and merge \
             back to develop soon.",
        ))
    } else {
        None
    }
}

/// Dependencies pinned to a commit hash. Lists every name.
pub fn commit_pinned_dependencies(pinned: &[String], profile: &PlatformProfile) -> Option<Finding> {
    if pinned.is_empty() {
        return None;
    }

    let manifest = profile
        .dependency_lock_name()
        .map(|name| name.trim_end_matches(".lock"))
        .unwrap_or("Dependencies");
    let names = pinned
        .iter()
        .map(|name| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Finding::fail(
        FindingKind::CommitPinnedDependency,
        format!("{manifest}: reference to a commit hash for {names}"),
    ))
}

/// The PR carries the release label, so some checks are skipped.
pub fn release_label(meta: &PrMetadata, profile: &PlatformProfile) -> Option<Finding> {
    if meta.has_release_label(profile) {
        Some(Finding::message(
            FindingKind::ReleaseLabel,
            format!(
                "This PR has the '{}' label: some checks will be skipped.",
                profile.release_label_marker
            ),
        ))
    } else {
        None
    }
}

/// The generated localization file was edited outside a release.
pub fn generated_strings_edited(
    changes: &ChangeSet,
    meta: &PrMetadata,
    profile: &PlatformProfile,
) -> Option<Finding> {
    let name = profile.generated_strings_name()?;
    if changes.generated_strings_changed(profile)
        && !meta.is_on_release_branch(profile)
        && !meta.has_release_label(profile)
    {
        Some(Finding::warn(
            FindingKind::GeneratedStringsEdited,
            format!(
                "{name} should only be updated on release branches because it is generated \
                 automatically."
            ),
        ))
    } else {
        None
    }
}
