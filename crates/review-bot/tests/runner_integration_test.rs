//! Runner integration tests: full review runs over in-memory PR snapshots.

use std::collections::HashMap;

use async_trait::async_trait;
use pr_policy::{ChangeSet, FindingKind, Platform, PrMetadata, Severity};
use review_bot::{
    CollectingSink, FindingSink, PrSnapshot, PullRequestSource, ReviewRunner, SnapshotSource,
    SourceError,
};

const MODEL_PATH: &str =
    "WordPress/Classes/WordPress.xcdatamodeld/WordPress 150.xcdatamodel/contents";

const STRINGS_PATH: &str = "WordPress/src/main/res/values/strings.xml";

const STRINGS_DIFF: &str = "\
diff --git a/WordPress/src/main/res/values/strings.xml b/WordPress/src/main/res/values/strings.xml
--- a/WordPress/src/main/res/values/strings.xml
+++ b/WordPress/src/main/res/values/strings.xml
@@ -1,3 +1,6 @@
 <resources>
+    <string name=\"alias\">@string/app_name</string>
+    <string name=\"fixed\" translatable=\"false\">@string/app_name</string>
+    <string name=\"alias_again\">@string/app_name</string>
 </resources>
";

fn snapshot(base: &str, head: &str, modified: &[&str]) -> PrSnapshot {
    PrSnapshot {
        metadata: PrMetadata {
            base_ref: base.to_string(),
            head_ref: head.to_string(),
            labels: vec![],
        },
        changes: ChangeSet {
            modified: modified.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        },
        ..Default::default()
    }
}

async fn run(platform: Platform, snapshot: PrSnapshot) -> Vec<pr_policy::Finding> {
    let runner = ReviewRunner::with_default_profile(platform);
    let source = SnapshotSource::new(snapshot);
    let mut sink = CollectingSink::default();
    runner.run(&source, &mut sink).await.unwrap();
    sink.findings
}

// ── Android ──────────────────────────────────────────────────────────

#[tokio::test]
async fn android_release_notes_without_translation_warns() {
    let findings = run(
        Platform::Android,
        snapshot("trunk", "feature/notes", &["fastlane/metadata/release_notes.txt"]),
    )
    .await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::ReleaseNotesWithoutTranslation);
}

#[tokio::test]
async fn android_release_notes_with_translation_is_clean() {
    let findings = run(
        Platform::Android,
        snapshot(
            "trunk",
            "feature/notes",
            &[
                "fastlane/metadata/release_notes.txt",
                "fastlane/metadata/PlayStoreStrings.po",
            ],
        ),
    )
    .await;
    assert!(findings.is_empty(), "{findings:?}");
}

#[tokio::test]
async fn android_string_references_warn_per_line() {
    let mut pr = snapshot("trunk", "feature/strings", &[STRINGS_PATH]);
    pr.diffs
        .insert(STRINGS_PATH.to_string(), STRINGS_DIFF.to_string());

    let findings = run(Platform::Android, pr).await;
    assert_eq!(findings.len(), 2);
    assert!(findings
        .iter()
        .all(|f| f.kind == FindingKind::StringResourceReference));
    assert!(findings[0].message.contains("name=\"alias\""));
    assert!(findings[1].message.contains("name=\"alias_again\""));
}

#[tokio::test]
async fn android_snapshot_with_added_text_is_scanned() {
    let mut pr = snapshot("trunk", "feature/strings", &[STRINGS_PATH]);
    pr.diffs.insert(
        STRINGS_PATH.to_string(),
        "    <string name=\"a\">@string/b</string>\n\
         \x20   <string name=\"c\" translatable=\"false\">@string/b</string>\n"
            .to_string(),
    );

    let findings = run(Platform::Android, pr).await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::StringResourceReference);
    assert!(findings[0].message.contains("name=\"a\""));
}

#[tokio::test]
async fn android_missing_diff_is_not_fatal() {
    let findings = run(
        Platform::Android,
        snapshot(
            "trunk",
            "x",
            &[STRINGS_PATH, "fastlane/metadata/release_notes.txt"],
        ),
    )
    .await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::ReleaseNotesWithoutTranslation);
}

// ── iOS ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn ios_commit_pinned_pod_fails() {
    let mut pr = snapshot("trunk", "feature/pods", &["Podfile", "Podfile.lock"]);
    pr.files.insert(
        "Podfile.lock".to_string(),
        "DEPENDENCIES:\n  \
         - \"Kanvas (from https://x, branch 'main')\"\n  \
         - \"WordPressUI (from https://y, commit 'abc123')\"\n"
            .to_string(),
    );

    let findings = run(Platform::Ios, pr).await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Fail);
    assert!(findings[0].message.contains("`WordPressUI`"));
    assert!(!findings[0].message.contains("Kanvas"));
}

#[tokio::test]
async fn ios_core_data_needs_release_branch_and_model_change() {
    let both = run(Platform::Ios, snapshot("release/25.0", "fix/x", &[MODEL_PATH])).await;
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].severity, Severity::Warn);
    assert_eq!(both[0].kind, FindingKind::DataModelOnReleaseBranch);

    let branch_only = run(Platform::Ios, snapshot("release/25.0", "fix/x", &["README.md"])).await;
    assert!(branch_only.is_empty());

    let model_only = run(Platform::Ios, snapshot("trunk", "fix/x", &[MODEL_PATH])).await;
    assert!(model_only.is_empty());
}

#[tokio::test]
async fn ios_release_label_skips_generated_strings_warning() {
    let localizable = "WordPress/Resources/en.lproj/Localizable.strings";

    let unlabeled = run(Platform::Ios, snapshot("trunk", "feature/x", &[localizable])).await;
    assert_eq!(unlabeled.len(), 1);
    assert_eq!(unlabeled[0].kind, FindingKind::GeneratedStringsEdited);

    let mut labeled = snapshot("trunk", "feature/x", &[localizable]);
    labeled.metadata.labels = vec!["Releases".to_string()];
    let findings = run(Platform::Ios, labeled).await;
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].severity, Severity::Message);
    assert_eq!(findings[0].kind, FindingKind::ReleaseLabel);
}

#[tokio::test]
async fn ios_malformed_lock_does_not_block_other_checks() {
    let mut pr = snapshot("trunk", "x", &["WordPress/Resources/release_notes.txt"]);
    pr.files
        .insert("Podfile.lock".to_string(), "DEPENDENCIES: [".to_string());

    let runner = ReviewRunner::with_default_profile(Platform::Ios);
    let mut sink = CollectingSink::default();
    let summary = runner
        .run(&SnapshotSource::new(pr), &mut sink)
        .await
        .unwrap();

    assert_eq!(summary.skipped_checks, 1);
    assert_eq!(sink.findings.len(), 1);
    assert_eq!(
        sink.findings[0].kind,
        FindingKind::ReleaseNotesWithoutTranslation
    );
}

#[tokio::test]
async fn runs_are_idempotent() {
    let mut pr = snapshot("release/25.0", "feature/x", &[MODEL_PATH, STRINGS_PATH]);
    pr.diffs
        .insert(STRINGS_PATH.to_string(), STRINGS_DIFF.to_string());

    for platform in [Platform::Android, Platform::Ios] {
        let first = run(platform, pr.clone()).await;
        let second = run(platform, pr.clone()).await;
        assert_eq!(first, second);
    }
}

// ── Failing collaborators ────────────────────────────────────────────

/// Source whose file lookups always fail.
struct BrokenFiles {
    changes: ChangeSet,
    meta: PrMetadata,
    diffs: HashMap<String, String>,
}

#[async_trait]
impl PullRequestSource for BrokenFiles {
    async fn change_set(&self) -> Result<ChangeSet, SourceError> {
        Ok(self.changes.clone())
    }

    async fn metadata(&self) -> Result<PrMetadata, SourceError> {
        Ok(self.meta.clone())
    }

    async fn diff_for_file(&self, path: &str) -> Result<Option<String>, SourceError> {
        Ok(self.diffs.get(path).cloned())
    }

    async fn file_contents(&self, path: &str) -> Result<Option<String>, SourceError> {
        Err(SourceError::Git {
            operation: format!("show HEAD:{path}"),
            stderr: "fatal: bad revision".to_string(),
        })
    }
}

#[tokio::test]
async fn unreadable_lock_is_skipped() {
    let source = BrokenFiles {
        changes: ChangeSet {
            created: vec![MODEL_PATH.to_string()],
            ..Default::default()
        },
        meta: PrMetadata {
            base_ref: "release/25.0".to_string(),
            ..Default::default()
        },
        diffs: HashMap::new(),
    };
    let runner = ReviewRunner::with_default_profile(Platform::Ios);
    let mut sink = CollectingSink::default();
    let summary = runner.run(&source, &mut sink).await.unwrap();

    assert_eq!(summary.skipped_checks, 1);
    assert_eq!(summary.warnings, 1);
    assert!(!summary.has_blocking());
    assert_eq!(sink.findings[0].kind, FindingKind::DataModelOnReleaseBranch);
}

/// Sink that rejects every write.
struct ClosedSink;

impl FindingSink for ClosedSink {
    fn emit(&mut self, _finding: &pr_policy::Finding) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
}

#[tokio::test]
async fn sink_failure_aborts_run() {
    let runner = ReviewRunner::with_default_profile(Platform::Android);
    let source = SnapshotSource::new(snapshot(
        "trunk",
        "x",
        &["fastlane/metadata/release_notes.txt"],
    ));
    assert!(runner.run(&source, &mut ClosedSink).await.is_err());
}
