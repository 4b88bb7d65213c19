//! Thin wrapper around the `git` binary for branch automation.
//!
//! Feature branches are created and checked out by shelling out to the
//! user's own git, never by reimplementing it. Failures carry git's stderr;
//! retry and recovery belong to the caller.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::info;

use crate::error::GitError;

/// Characters git refuses in reference names.
const FORBIDDEN_NAME_CHARS: &[char] = &[' ', '~', '^', ':', '?', '*', '[', '\\'];

/// Checks a branch name against git's reference-name rules.
///
/// A local pre-check only; git itself remains the authority when the
/// command runs.
pub fn is_valid_branch_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('/')
        && !name.ends_with('/')
        && !name.starts_with('-')
        && !name.ends_with('.')
        && !name.ends_with(".lock")
        && !name.contains("..")
        && !name.contains("//")
        && !name.contains("@{")
        && !name
            .chars()
            .any(|c| c.is_control() || FORBIDDEN_NAME_CHARS.contains(&c))
}

/// Returns the branch currently checked out in `dir`.
pub async fn current_branch(dir: &Path) -> Result<String, GitError> {
    run_git(dir, &["rev-parse", "--abbrev-ref", "HEAD"]).await
}

/// Returns whether a local branch named `name` exists in `dir`.
pub async fn branch_exists(dir: &Path, name: &str) -> Result<bool, GitError> {
    ensure_valid_name(name)?;
    let output = Command::new("git")
        .args(["rev-parse", "--verify", "--quiet", &format!("refs/heads/{name}")])
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await?;
    Ok(output.status.success())
}

/// Creates a local branch named `name` pointing at HEAD.
pub async fn create_branch(dir: &Path, name: &str) -> Result<(), GitError> {
    ensure_valid_name(name)?;
    run_git(dir, &["branch", name]).await?;
    Ok(())
}

/// Checks out an existing branch.
pub async fn checkout(dir: &Path, name: &str) -> Result<(), GitError> {
    ensure_valid_name(name)?;
    run_git(dir, &["checkout", name]).await?;
    Ok(())
}

/// Checks out `name`, creating the branch first when it does not exist.
pub async fn switch_or_create(dir: &Path, name: &str) -> Result<(), GitError> {
    ensure_valid_name(name)?;
    if !branch_exists(dir, name).await? {
        info!(branch = name, "Creating branch");
        run_git(dir, &["branch", name]).await?;
    }
    run_git(dir, &["checkout", name]).await?;
    Ok(())
}

fn ensure_valid_name(name: &str) -> Result<(), GitError> {
    if is_valid_branch_name(name) {
        Ok(())
    } else {
        Err(GitError::InvalidBranchName(name.to_string()))
    }
}

/// Runs a git command in `dir` and returns its trimmed stdout.
async fn run_git(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
