//! Review bot: runs the mobile PR policy checks against live PR data.
//!
//! - [`source`]: where changed files, diffs, file contents, and metadata come from
//! - [`sink`]: where findings go
//! - [`runner`]: the per-platform check sequence
//! - [`config`]: profile overrides from TOML and env

pub mod config;
pub mod runner;
pub mod sink;
pub mod source;

pub use config::BotConfig;
pub use runner::{ReviewRunner, RunError, RunSummary};
pub use sink::{CollectingSink, FindingSink, JsonLinesSink, OutputFormat, TextSink};
pub use source::{GitSource, PrSnapshot, PullRequestSource, SnapshotSource, SourceError};
