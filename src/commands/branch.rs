//! Implementation of the `flow branchFromClipboard` command.

use crate::clipboard::{extract_branch_name, read_clipboard_text, validate_clipboard_branch};
use crate::context::FlowContext;
use crate::error::Result;
use crate::events::{Event, EventAction, record_event};
use crate::git::{branch_exists, run_git_streaming};
use serde_json::json;
use std::path::Path;

/// Execute the `flow branchFromClipboard` command.
pub fn cmd_branch_from_clipboard(ctx: &FlowContext) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let raw = read_clipboard_text()?;
    switch_or_create_branch(ctx, &repo_root, &raw)?;
    Ok(())
}

/// Check out the branch named in `raw`, creating it if it doesn't exist.
///
/// Returns `true` when a new branch was created.
fn switch_or_create_branch(ctx: &FlowContext, repo_root: &Path, raw: &str) -> Result<bool> {
    let branch = extract_branch_name(raw);
    validate_clipboard_branch(&branch)?;

    let created = if branch_exists(repo_root, &branch)? {
        run_git_streaming(repo_root, &["checkout", &branch])?;
        println!("✔️ Switched to {}", branch);
        false
    } else {
        run_git_streaming(repo_root, &["checkout", "-b", &branch])?;
        println!("✔️ Created and switched to {}", branch);
        true
    };

    record_event(
        ctx,
        Event::new(EventAction::Branch)
            .with_repo(repo_root)
            .with_details(json!({"branch": branch, "created": created})),
    );

    Ok(created)
}
