//! CLI for the Fixed Issue Closer.
//!
//! This tool runs after a pull request is merged, closes every issue the
//! pull request claims to fix, and optionally comments on each one.

use clap::Parser;
use fixed_issue_closer::{RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Fixed Issue Closer - Close the issues a merged pull request claims to fix.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// GitHub token used for API calls.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Repository slug in "owner/repo" form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Name of the event that triggered this run.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    event_name: String,

    /// Path to the JSON payload of the trigger event.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: PathBuf,

    /// Comment template posted on each closed issue ({{pr}} expands to the PR number).
    #[arg(long, env = "INPUT_COMMENT")]
    comment: Option<String>,

    /// Set to "false" to close issues even when the PR merged into the default branch.
    #[arg(long, env = "INPUT_IGNORE")]
    ignore: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::from(0)
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::from(1)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        // Use compact formatting without module target paths for cleaner output
        .with(fmt::layer().compact().with_target(false))
        // Allow runtime log filtering via RUST_LOG env var (e.g., RUST_LOG=debug)
        // Falls back to "info" level if RUST_LOG is not set or invalid
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        // Register as the global default subscriber
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    // Any value except the literal "false" leaves the default-branch skip active.
    let skip_default_branch = args.ignore.as_deref() != Some("false");

    let config = RunnerConfig::new(args.token, args.repository, args.event_name, args.event_path)
        .with_comment(args.comment)
        .with_skip_default_branch(skip_default_branch);

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");

    if let Some(reason) = &summary.skip_reason {
        println!("  Skipped: {reason}");
        return;
    }

    println!("  Issues referenced: {}", summary.issues_found);
    println!("  Issues closed: {}", summary.issues_closed);
    println!("  Already closed: {}", summary.issues_already_closed);
    println!("  Comments posted: {}", summary.comments_posted);
}
