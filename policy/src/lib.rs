//! Pull Request Policy Checks
//!
//! Deterministic review rules for the Android and iOS mobile apps. This crate
//! does no I/O: callers fetch the change set, PR metadata, diffs, and file
//! contents, then hand them to the checks below.
//!
//! # Pipeline
//!
//! ```text
//! Change-Set Classifier (paths, branches, labels)
//!    │ gates
//!    ▼
//! Dependency-Lock Scanner      Diff Policy Scanner
//!    │ commit-pinned names        │ offending added lines
//!    ▼                            ▼
//! Rules → Finding { severity, kind, message }
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pr_policy::{DependencyManifest, PlatformProfile, rules};
//!
//! let lock = "DEPENDENCIES:\n  - WordPressUI (from `https://y`, commit `abc123`)\n";
//! let pinned = DependencyManifest::from_lock_str(lock).unwrap().commit_pinned();
//! let finding = rules::commit_pinned_dependencies(&pinned, &PlatformProfile::ios());
//! assert!(finding.unwrap().message.contains("WordPressUI"));
//! ```

pub mod change_set;
pub mod dependency_lock;
pub mod diff_scan;
pub mod error;
pub mod finding;
pub mod platform;
pub mod rules;

pub use change_set::{ChangeSet, PrMetadata};
pub use dependency_lock::{find_commit_pods, DependencyManifest, DependencyNode};
pub use diff_scan::{added_lines, added_text, is_unified_diff, scan_added_string_resources};
pub use error::{PolicyError, PolicyResult};
pub use finding::{Finding, FindingKind, Severity};
pub use platform::{Platform, PlatformProfile};
