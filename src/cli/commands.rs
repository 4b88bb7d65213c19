//! CLI command definitions for specforge.
//!
//! Three commands: `extract` pulls a JSON payload out of free-form text,
//! `check` runs the coherence review over a spec document (optionally gating
//! branch creation on the verdict), and `branch` drives the git helper
//! directly.

use std::path::PathBuf;

use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{info, warn};

use crate::git;
use crate::review::{Reviewer, ReviewerConfig, Severity};
use crate::utils::json_extraction::extract_json;

/// Default reviewer command line.
const DEFAULT_REVIEWER: &str = "claude --print";

/// Default repository directory for branch operations.
const DEFAULT_DIR: &str = ".";

/// Coherence gate for feature specs.
#[derive(Parser)]
#[command(name = "specforge")]
#[command(about = "Review feature specs with an LLM and gate branch setup on the verdict")]
#[command(version)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Extract a JSON payload from free-form text and pretty-print it.
    Extract(ExtractArgs),

    /// Review a spec document for coherence; optionally create the feature
    /// branch when the verdict is coherent.
    Check(CheckArgs),

    /// Create a feature branch, or switch to it when it already exists.
    Branch(BranchArgs),
}

/// Arguments for the `extract` command.
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// File to read; stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Spec document to review.
    #[arg(short, long)]
    pub spec: PathBuf,

    /// Branch to create and check out when the verdict is coherent.
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Reviewer command line (program followed by arguments).
    #[arg(long, default_value = DEFAULT_REVIEWER)]
    pub reviewer: String,

    /// Repository directory for branch operations.
    #[arg(long, default_value = DEFAULT_DIR)]
    pub dir: PathBuf,
}

/// Arguments for the `branch` command.
#[derive(Parser, Debug)]
pub struct BranchArgs {
    /// Branch name.
    pub name: String,

    /// Repository directory.
    #[arg(long, default_value = DEFAULT_DIR)]
    pub dir: PathBuf,
}

/// Parses command-line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Runs the command selected by the parsed CLI.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Extract(args) => run_extract(args).await,
        Commands::Check(args) => run_check(args).await,
        Commands::Branch(args) => run_branch(args).await,
    }
}

async fn run_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let text = match &args.input {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };

    let payload: serde_json::Value = extract_json(&text)?;
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn run_check(args: CheckArgs) -> anyhow::Result<()> {
    let document = tokio::fs::read_to_string(&args.spec).await?;
    let config = ReviewerConfig::from_command_line(&args.reviewer)?;
    let reviewer = Reviewer::new(config);

    info!(spec = %args.spec.display(), "Running coherence review");
    let verdict = reviewer.review(&document).await?;

    for issue in &verdict.issues {
        match issue.severity {
            Severity::Critical | Severity::Major => warn!(
                severity = ?issue.severity,
                fix_hint = %issue.fix_hint,
                "{}",
                issue.description
            ),
            Severity::Minor => info!(
                severity = ?issue.severity,
                fix_hint = %issue.fix_hint,
                "{}",
                issue.description
            ),
        }
    }

    println!("{}", serde_json::to_string_pretty(&verdict)?);

    if !verdict.coherent {
        anyhow::bail!(
            "Spec is not coherent: {} issue(s) found",
            verdict.issues.len()
        );
    }

    if let Some(branch) = &args.branch {
        git::switch_or_create(&args.dir, branch).await?;
        info!(branch = %branch, "Checked out feature branch");
    }

    Ok(())
}

async fn run_branch(args: BranchArgs) -> anyhow::Result<()> {
    git::switch_or_create(&args.dir, &args.name).await?;
    info!(branch = %args.name, "Checked out feature branch");
    Ok(())
}
