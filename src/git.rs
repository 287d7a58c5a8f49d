//! Git command runner for flow.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. All git operations should go through this module.

use crate::error::{FlowError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// Returns true if stdout is empty.
    pub fn is_empty(&self) -> bool {
        self.stdout.is_empty()
    }

    /// Returns stdout lines as a vector.
    pub fn lines(&self) -> Vec<&str> {
        if self.stdout.is_empty() {
            Vec::new()
        } else {
            self.stdout.lines().collect()
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(FlowError::GitError)` - On non-zero exit code, with git's stderr as the message
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let cwd = cwd.as_ref();
    log::debug!("$ git {} [{}]", args.join(" "), cwd.display());

    let output = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| {
            FlowError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };
        log::debug!("git {} exited with {}", args.join(" "), exit_code);

        Err(FlowError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Run a git command with stdio inherited from the flow process.
///
/// Used for commands whose progress the user should see as it happens
/// (`commit`, `push`).
pub fn run_git_streaming<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<()> {
    let cwd = cwd.as_ref();
    log::debug!("$ git {} [{}]", args.join(" "), cwd.display());

    let status = Command::new("git")
        .current_dir(cwd)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| {
            FlowError::GitError(format!(
                "failed to execute git {}: {}",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    if status.success() {
        Ok(())
    } else {
        Err(FlowError::GitError(format!(
            "git {} failed (exit code {})",
            args.join(" "),
            status.code().unwrap_or(-1)
        )))
    }
}

/// Get the repository root directory using `git rev-parse --show-toplevel`.
///
/// Doubles as the "am I inside a work tree" check: outside a repository this
/// returns a `UserError` (exit 1) rather than a `GitError`.
pub fn get_repo_root<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let cwd = cwd.as_ref();
    log::debug!("$ git rev-parse --show-toplevel [{}]", cwd.display());

    let output = Command::new("git")
        .current_dir(cwd)
        .args(["rev-parse", "--show-toplevel"])
        .output()
        .map_err(|e| {
            FlowError::UserError(format!("failed to execute git: {} (is git installed?)", e))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() && !git_output.stdout.is_empty() {
        return Ok(PathBuf::from(&git_output.stdout));
    }

    let stderr = &git_output.stderr;
    if stderr.contains("not a git repository") || stderr.contains("fatal:") || stderr.is_empty() {
        Err(FlowError::UserError(
            "not inside a git repository. Run this command from within a git repository."
                .to_string(),
        ))
    } else {
        Err(FlowError::UserError(format!("git command failed: {}", stderr)))
    }
}

/// List configured remotes in the order `git remote` reports them.
///
/// An empty list is not an error here; callers decide what "no remotes" means.
pub fn list_remotes<P: AsRef<Path>>(repo_root: P) -> Result<Vec<String>> {
    let output = run_git(repo_root, &["remote"])?;
    Ok(output
        .lines()
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect())
}

/// Check whether a fully qualified ref (e.g. `refs/heads/main`) exists.
///
/// A non-zero exit from `rev-parse --verify` means "no such ref"; only a
/// failure to run git at all is an error.
pub fn ref_exists<P: AsRef<Path>>(repo_root: P, full_ref: &str) -> Result<bool> {
    let repo_root = repo_root.as_ref();
    log::debug!("$ git rev-parse --verify --quiet {}", full_ref);

    let status = Command::new("git")
        .current_dir(repo_root)
        .args(["rev-parse", "--verify", "--quiet", full_ref])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| FlowError::GitError(format!("failed to execute git rev-parse: {}", e)))?;

    Ok(status.success())
}

/// Check if a branch exists locally (`refs/heads/<branch>`).
pub fn branch_exists<P: AsRef<Path>>(repo_root: P, branch: &str) -> Result<bool> {
    ref_exists(repo_root, &format!("refs/heads/{}", branch))
}

/// Ask the remote whether it has a branch with exactly this name.
///
/// Runs `git ls-remote --heads <remote> refs/heads/<branch>`; this is a
/// network round trip.
pub fn remote_has_branch<P: AsRef<Path>>(repo_root: P, remote: &str, branch: &str) -> Result<bool> {
    let pattern = format!("refs/heads/{}", branch);
    let output = run_git(repo_root, &["ls-remote", "--heads", remote, &pattern])?;
    Ok(!output.is_empty())
}

/// Name of the currently checked out branch (`HEAD` when detached).
#[cfg(test)]
pub(crate) fn current_branch<P: AsRef<Path>>(repo_root: P) -> Result<String> {
    let output = run_git(repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(output.stdout)
}
