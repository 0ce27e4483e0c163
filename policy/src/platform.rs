//! Per-platform file naming conventions.
//!
//! Both apps follow the same review rules but keep their release metadata in
//! different places. A [`PlatformProfile`] collects every path marker the
//! checks match against so the rules themselves stay platform-agnostic.

use serde::{Deserialize, Serialize};

/// Branch prefix reserved for release preparation.
pub const DEFAULT_RELEASE_BRANCH_PREFIX: &str = "release/";

/// Substring identifying the release label on a PR.
pub const DEFAULT_RELEASE_LABEL_MARKER: &str = "Releases";

/// Which app a review run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Android app (Play Store metadata, `strings.xml` resources)
    Android,
    /// iOS / macOS app (App Store metadata, CocoaPods, Core Data)
    Ios,
}

impl Platform {
    /// Built-in profile for this platform.
    pub fn default_profile(self) -> PlatformProfile {
        match self {
            Self::Android => PlatformProfile::android(),
            Self::Ios => PlatformProfile::ios(),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "android" => Ok(Self::Android),
            "ios" | "macos" => Ok(Self::Ios),
            other => Err(format!("unknown platform '{other}'")),
        }
    }
}

/// Path markers and branch conventions for one platform.
///
/// Optional markers are `None` when the platform has no such file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformProfile {
    /// Suffix of the release notes file
    pub release_notes_suffix: String,
    /// Marker contained in the translation catalog path
    pub translation_catalog_marker: String,
    /// Suffix of Android string resource files scanned for `@string/` references
    pub string_resource_suffix: Option<String>,
    /// Marker contained in any data model path
    pub data_model_marker: Option<String>,
    /// Dependency lock file fetched at the head commit
    pub dependency_lock_path: Option<String>,
    /// Suffix of the generated localization file
    pub generated_strings_suffix: Option<String>,
    /// Branch name prefix of release branches
    pub release_branch_prefix: String,
    /// Substring of the release label name
    pub release_label_marker: String,
}

impl PlatformProfile {
    pub fn android() -> Self {
        Self {
            release_notes_suffix: "metadata/release_notes.txt".to_string(),
            translation_catalog_marker: "metadata/PlayStoreStrings.po".to_string(),
            string_resource_suffix: Some("values/strings.xml".to_string()),
            data_model_marker: None,
            dependency_lock_path: None,
            generated_strings_suffix: None,
            release_branch_prefix: DEFAULT_RELEASE_BRANCH_PREFIX.to_string(),
            release_label_marker: DEFAULT_RELEASE_LABEL_MARKER.to_string(),
        }
    }

    pub fn ios() -> Self {
        Self {
            release_notes_suffix: "Resources/release_notes.txt".to_string(),
            translation_catalog_marker: "Resources/AppStoreStrings.po".to_string(),
            string_resource_suffix: None,
            data_model_marker: Some(".xcdatamodeld".to_string()),
            dependency_lock_path: Some("Podfile.lock".to_string()),
            generated_strings_suffix: Some("Resources/en.lproj/Localizable.strings".to_string()),
            release_branch_prefix: DEFAULT_RELEASE_BRANCH_PREFIX.to_string(),
            release_label_marker: DEFAULT_RELEASE_LABEL_MARKER.to_string(),
        }
    }

    /// File name of the translation catalog, for messages.
    pub fn translation_catalog_name(&self) -> &str {
        file_name(&self.translation_catalog_marker)
    }

    /// File name of the generated localization file, for messages.
    pub fn generated_strings_name(&self) -> Option<&str> {
        self.generated_strings_suffix.as_deref().map(file_name)
    }

    /// File name of the string resource file, for messages.
    pub fn string_resource_name(&self) -> Option<&str> {
        self.string_resource_suffix.as_deref().map(file_name)
    }

    /// File name of the dependency lock, for messages.
    pub fn dependency_lock_name(&self) -> Option<&str> {
        self.dependency_lock_path.as_deref().map(file_name)
    }
}

impl Default for PlatformProfile {
    fn default() -> Self {
        Self::android()
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
