//! `review-bot` command line.
//!
//! ```bash
//! # Review a PR snapshot exported by the CI platform
//! review-bot android snapshot pr.json
//!
//! # Review local refs, JSON output
//! review-bot --format json ios git --base trunk --head release/24.1 --label Releases
//! ```
//!
//! Findings go to stdout, logs to stderr (`RUST_LOG` controls verbosity).
//! Exits with status 1 when a blocking finding was emitted.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pr_policy::Platform;
use review_bot::{
    BotConfig, GitSource, OutputFormat, PullRequestSource, ReviewRunner, SnapshotSource,
};
use tracing::info;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Mobile pull-request policy checks", long_about = None)]
struct Cli {
    /// TOML config with profile overrides (overrides REVIEW_BOT_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Finding output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// App under review: android or ios
    platform: Platform,

    #[command(subcommand)]
    source: SourceCommand,
}

#[derive(Subcommand, Debug)]
enum SourceCommand {
    /// Read PR data from a JSON snapshot
    Snapshot { path: PathBuf },
    /// Read PR data from a local git checkout
    Git {
        #[arg(long)]
        base: String,
        #[arg(long)]
        head: String,
        #[arg(long, default_value = ".")]
        repo: PathBuf,
        /// PR label, repeatable
        #[arg(long = "label")]
        labels: Vec<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = BotConfig::load(cli.config.as_deref())?;
    let runner = ReviewRunner::new(cli.platform, config.profile(cli.platform));

    let source: Box<dyn PullRequestSource> = match cli.source {
        SourceCommand::Snapshot { path } => Box::new(
            SnapshotSource::load(&path)
                .await
                .with_context(|| format!("Failed to load snapshot {}", path.display()))?,
        ),
        SourceCommand::Git {
            base,
            head,
            repo,
            labels,
        } => Box::new(GitSource::new(repo, &base, &head, labels)),
    };

    let stdout = std::io::stdout();
    let mut sink = cli.format.sink(stdout.lock());
    let summary = runner
        .run(source.as_ref(), sink.as_mut())
        .await
        .context("Review run failed")?;

    info!(
        platform = %cli.platform,
        total = summary.total(),
        blocking = summary.has_blocking(),
        "Findings delivered"
    );

    Ok(if summary.has_blocking() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
