//! Review run orchestration.
//!
//! Fetches PR data from a [`PullRequestSource`], runs the platform's rules in
//! a fixed order, and emits each finding to a [`FindingSink`] as soon as it is
//! produced.
//!
//! # Check order
//!
//! ```text
//! android: release notes → string resources (one file at a time)
//! ios:     data model → dependency lock → release notes → release label → generated strings
//! ```
//!
//! A check whose input cannot be fetched or decoded is skipped with a warning;
//! the remaining checks still run. Only a sink write failure aborts the run.

use pr_policy::{
    added_text, rules, scan_added_string_resources, ChangeSet, DependencyManifest, Finding,
    Platform, PlatformProfile, PrMetadata, Severity,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::sink::FindingSink;
use crate::source::PullRequestSource;

/// Errors that abort a review run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to deliver finding: {0}")]
    Sink(#[from] std::io::Error),
}

/// Counts of what a run emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub messages: usize,
    pub warnings: usize,
    pub failures: usize,
    /// Checks skipped because their input was unavailable
    pub skipped_checks: usize,
}

impl RunSummary {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Message => self.messages += 1,
            Severity::Warn => self.warnings += 1,
            Severity::Fail => self.failures += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.messages + self.warnings + self.failures
    }

    /// Whether a blocking finding was emitted.
    pub fn has_blocking(&self) -> bool {
        self.failures > 0
    }

    /// Compact text summary for logging.
    ///
    /// Example: `[FAIL] 1 fail | 2 warn | 0 message`
    pub fn compact_summary(&self) -> String {
        let status = if self.has_blocking() { "FAIL" } else { "PASS" };
        let mut parts = vec![
            format!("[{}] {} fail", status, self.failures),
            format!("{} warn", self.warnings),
            format!("{} message", self.messages),
        ];
        if self.skipped_checks > 0 {
            parts.push(format!("{} skipped", self.skipped_checks));
        }
        parts.join(" | ")
    }
}

/// Runs one platform's review rules.
#[derive(Debug, Clone)]
pub struct ReviewRunner {
    platform: Platform,
    profile: PlatformProfile,
}

struct Emitter<'a, K: FindingSink + ?Sized> {
    sink: &'a mut K,
    summary: RunSummary,
}

impl<K: FindingSink + ?Sized> Emitter<'_, K> {
    fn emit(&mut self, finding: Option<Finding>) -> Result<(), RunError> {
        if let Some(finding) = finding {
            debug!(severity = %finding.severity, kind = %finding.kind, "emitting finding");
            self.sink.emit(&finding)?;
            self.summary.record(finding.severity);
        }
        Ok(())
    }

    fn skip(&mut self, check: &str, reason: &dyn std::fmt::Display) {
        warn!(check, "skipping check: {reason}");
        self.summary.skipped_checks += 1;
    }
}

impl ReviewRunner {
    pub fn new(platform: Platform, profile: PlatformProfile) -> Self {
        Self { platform, profile }
    }

    /// Runner with the built-in profile of `platform`.
    pub fn with_default_profile(platform: Platform) -> Self {
        Self::new(platform, platform.default_profile())
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn profile(&self) -> &PlatformProfile {
        &self.profile
    }

    pub async fn run<S, K>(&self, source: &S, sink: &mut K) -> Result<RunSummary, RunError>
    where
        S: PullRequestSource + ?Sized,
        K: FindingSink + ?Sized,
    {
        let mut out = Emitter {
            sink,
            summary: RunSummary::default(),
        };

        let changes = match source.change_set().await {
            Ok(changes) => changes,
            Err(e) => {
                out.skip("change_set", &e);
                ChangeSet::default()
            }
        };
        let meta = match source.metadata().await {
            Ok(meta) => meta,
            Err(e) => {
                out.skip("metadata", &e);
                PrMetadata::default()
            }
        };

        info!(
            platform = %self.platform,
            modified = changes.modified.len(),
            created = changes.created.len(),
            deleted = changes.deleted.len(),
            base = %meta.base_ref,
            head = %meta.head_ref,
            "Starting review run"
        );

        match self.platform {
            Platform::Android => self.run_android(source, &changes, &mut out).await?,
            Platform::Ios => self.run_ios(source, &changes, &meta, &mut out).await?,
        }

        info!(summary = %out.summary.compact_summary(), "Review run complete");
        Ok(out.summary)
    }

    async fn run_android<S, K>(
        &self,
        source: &S,
        changes: &ChangeSet,
        out: &mut Emitter<'_, K>,
    ) -> Result<(), RunError>
    where
        S: PullRequestSource + ?Sized,
        K: FindingSink + ?Sized,
    {
        let profile = &self.profile;
        out.emit(rules::release_notes_without_translation(changes, profile))?;
        self.scan_string_resources(source, changes, out).await
    }

    async fn run_ios<S, K>(
        &self,
        source: &S,
        changes: &ChangeSet,
        meta: &PrMetadata,
        out: &mut Emitter<'_, K>,
    ) -> Result<(), RunError>
    where
        S: PullRequestSource + ?Sized,
        K: FindingSink + ?Sized,
    {
        let profile = &self.profile;
        out.emit(rules::data_model_on_release_branch(changes, meta, profile))?;
        self.scan_dependency_lock(source, out).await?;
        out.emit(rules::release_notes_without_translation(changes, profile))?;
        out.emit(rules::release_label(meta, profile))?;
        out.emit(rules::generated_strings_edited(changes, meta, profile))?;
        // String resources only exist when a profile override names them.
        self.scan_string_resources(source, changes, out).await
    }

    async fn scan_string_resources<S, K>(
        &self,
        source: &S,
        changes: &ChangeSet,
        out: &mut Emitter<'_, K>,
    ) -> Result<(), RunError>
    where
        S: PullRequestSource + ?Sized,
        K: FindingSink + ?Sized,
    {
        for path in changes.string_resource_files(&self.profile) {
            let diff = match source.diff_for_file(path).await {
                Ok(Some(diff)) => diff,
                Ok(None) => {
                    debug!(path, "no diff available");
                    continue;
                }
                Err(e) => {
                    out.skip("string_resources", &e);
                    continue;
                }
            };
            let findings = scan_added_string_resources(&added_text(&diff));
            debug!(path, count = findings.len(), "scanned string resources");
            for finding in findings {
                out.emit(Some(finding))?;
            }
        }
        Ok(())
    }

    async fn scan_dependency_lock<S, K>(
        &self,
        source: &S,
        out: &mut Emitter<'_, K>,
    ) -> Result<(), RunError>
    where
        S: PullRequestSource + ?Sized,
        K: FindingSink + ?Sized,
    {
        let Some(lock_path) = self.profile.dependency_lock_path.as_deref() else {
            return Ok(());
        };

        let text = match source.file_contents(lock_path).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                debug!(lock_path, "dependency lock not present");
                return Ok(());
            }
            Err(e) => {
                out.skip("dependency_lock", &e);
                return Ok(());
            }
        };

        let manifest = match DependencyManifest::from_lock_str(&text) {
            Ok(manifest) => manifest,
            Err(e) => {
                out.skip("dependency_lock", &e);
                return Ok(());
            }
        };

        let pinned = manifest.commit_pinned();
        debug!(
            lock_path,
            dependencies = manifest.dependencies.len(),
            pinned = pinned.len(),
            "scanned dependency lock"
        );
        out.emit(rules::commit_pinned_dependencies(&pinned, &self.profile))
    }
}
