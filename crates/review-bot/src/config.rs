//! Review bot configuration.
//!
//! Defaults match the conventions of both mobile repos. A TOML file can
//! override any profile field per platform:
//!
//! ```toml
//! [ios]
//! dependency_lock_path = "Modules/Podfile.lock"
//!
//! [android]
//! release_notes_suffix = "metadata/release_notes_short.txt"
//! ```
//!
//! `REVIEW_BOT_RELEASE_PREFIX` and `REVIEW_BOT_RELEASE_LABEL` override the
//! release branch prefix and label marker of both platforms.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pr_policy::{Platform, PlatformProfile};
use serde::Deserialize;

/// Env var naming the config file when `--config` is not given.
pub const CONFIG_PATH_ENV: &str = "REVIEW_BOT_CONFIG";
pub const RELEASE_PREFIX_ENV: &str = "REVIEW_BOT_RELEASE_PREFIX";
pub const RELEASE_LABEL_ENV: &str = "REVIEW_BOT_RELEASE_LABEL";

/// Optional overrides for one [`PlatformProfile`].
///
/// A field left out keeps the built-in value. An empty string clears an
/// optional marker; an empty release prefix or label marker is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileOverrides {
    pub release_notes_suffix: Option<String>,
    pub translation_catalog_marker: Option<String>,
    pub string_resource_suffix: Option<String>,
    pub data_model_marker: Option<String>,
    pub dependency_lock_path: Option<String>,
    pub generated_strings_suffix: Option<String>,
    pub release_branch_prefix: Option<String>,
    pub release_label_marker: Option<String>,
}

impl ProfileOverrides {
    pub fn apply(&self, mut profile: PlatformProfile) -> PlatformProfile {
        fn optional(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        if let Some(v) = &self.release_notes_suffix {
            profile.release_notes_suffix = v.clone();
        }
        if let Some(v) = &self.translation_catalog_marker {
            profile.translation_catalog_marker = v.clone();
        }
        if let Some(v) = &self.string_resource_suffix {
            profile.string_resource_suffix = optional(v);
        }
        if let Some(v) = &self.data_model_marker {
            profile.data_model_marker = optional(v);
        }
        if let Some(v) = &self.dependency_lock_path {
            profile.dependency_lock_path = optional(v);
        }
        if let Some(v) = &self.generated_strings_suffix {
            profile.generated_strings_suffix = optional(v);
        }
        if let Some(v) = self.release_branch_prefix.as_deref().and_then(optional) {
            profile.release_branch_prefix = v;
        }
        if let Some(v) = self.release_label_marker.as_deref().and_then(optional) {
            profile.release_label_marker = v;
        }
        profile
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BotConfig {
    pub android: ProfileOverrides,
    pub ios: ProfileOverrides,
}

impl BotConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse review bot config")
    }

    /// Load from `path`, falling back to `REVIEW_BOT_CONFIG`, then defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from));

        let mut config = match path {
            Some(path) => {
                let text = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config {}", path.display()))?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply the release prefix / label env overrides to both platforms.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(prefix) = var(RELEASE_PREFIX_ENV) {
            self.android.release_branch_prefix = Some(prefix.clone());
            self.ios.release_branch_prefix = Some(prefix);
        }
        if let Some(label) = var(RELEASE_LABEL_ENV) {
            self.android.release_label_marker = Some(label.clone());
            self.ios.release_label_marker = Some(label);
        }
    }

    /// Effective profile for `platform`.
    pub fn profile(&self, platform: Platform) -> PlatformProfile {
        let overrides = match platform {
            Platform::Android => &self.android,
            Platform::Ios => &self.ios,
        };
        overrides.apply(platform.default_profile())
    }
}
