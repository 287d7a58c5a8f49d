//! Commit message generation and commit creation.
//!
//! Flow for `commit`, `commitPush`, and `commitReviewAndPush`:
//!
//! 1. Stage everything with `git add .`
//! 2. Read `git diff --cached` (error if nothing is staged)
//! 3. Truncate the diff to `max_commit_diff_chars` and add `git status --short`
//! 4. Ask the chat-completions endpoint for a message
//! 5. Commit with one `-m` per paragraph, optionally push

mod message;
mod openai;
mod review;

pub use message::{CommitMessage, truncate_diff};
pub use openai::CommitMessageClient;
pub use review::{ReviewOutcome, edit_in_editor, find_editor, review_message};

use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use crate::git::{run_git, run_git_streaming};
use std::path::Path;
use std::time::Duration;

/// Stage all changes in `workdir` and generate a commit message for them.
pub fn prepare_commit(ctx: &FlowContext, workdir: &Path) -> Result<CommitMessage> {
    let api_key = ctx.require_api_key()?;

    run_git(workdir, &["add", "."])?;

    let diff = run_git(workdir, &["diff", "--cached"])?.stdout;
    if diff.trim().is_empty() {
        return Err(FlowError::UserError(
            "no staged changes to commit; stage files with git add".to_string(),
        ));
    }

    let (diff, truncated) = truncate_diff(&diff, ctx.config.max_commit_diff_chars);
    if truncated {
        log::debug!(
            "diff truncated to {} characters",
            ctx.config.max_commit_diff_chars
        );
    }

    // Status is context for the model; a failure here is not worth aborting over.
    let status = run_git(workdir, &["status", "--short"])
        .map(|output| output.stdout)
        .unwrap_or_default();

    let client = CommitMessageClient::new(
        api_key,
        &ctx.config.openai_base_url,
        &ctx.config.commit_model,
        Duration::from_secs(ctx.config.commit_timeout_secs),
    )?;
    let raw = client.generate(&diff, &status, truncated)?;

    CommitMessage::from_model_output(&raw)
}

/// Commit the staged changes with `message`.
pub fn create_commit(workdir: &Path, message: &CommitMessage) -> Result<()> {
    run_git_streaming(workdir, &message.commit_args())
}

/// Push the current branch to its upstream.
pub fn push(workdir: &Path) -> Result<()> {
    run_git_streaming(workdir, &["push"])
}
