//! Implementations of `flow commit`, `flow commitPush`, and
//! `flow commitReviewAndPush`.

use crate::commit::{
    CommitMessage, ReviewOutcome, create_commit, edit_in_editor, find_editor, prepare_commit,
    push, review_message,
};
use crate::context::FlowContext;
use crate::error::Result;
use crate::events::{Event, EventAction, record_event};
use serde_json::json;
use std::io;
use std::path::Path;

/// Execute the `flow commit` command.
pub fn cmd_commit(ctx: &FlowContext) -> Result<()> {
    generate_and_commit(ctx, false)
}

/// Execute the `flow commitPush` command.
pub fn cmd_commit_push(ctx: &FlowContext) -> Result<()> {
    generate_and_commit(ctx, true)
}

/// Execute the `flow commitReviewAndPush` command.
///
/// The generated message is shown for review; the user can accept it,
/// cancel, or rewrite it in their editor before committing and pushing.
pub fn cmd_commit_review_and_push(ctx: &FlowContext) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let message = prepare_commit(ctx, &ctx.cwd)?;

    let editor = find_editor(|var| std::env::var(var).ok());
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    match review_message(message, &mut input, &mut out, |current| {
        edit_in_editor(&editor, current)
    })? {
        ReviewOutcome::Cancel => {
            println!("Commit cancelled.");
            Ok(())
        }
        ReviewOutcome::Accept(message) => {
            println!("Proposed commit message:\n{}\n", message.text());
            commit_and_maybe_push(ctx, &repo_root, &message, true)
        }
    }
}

fn generate_and_commit(ctx: &FlowContext, push_after: bool) -> Result<()> {
    let repo_root = ctx.repo_root()?;
    let message = prepare_commit(ctx, &ctx.cwd)?;
    println!("Proposed commit message:\n{}\n", message.text());
    commit_and_maybe_push(ctx, &repo_root, &message, push_after)
}

fn commit_and_maybe_push(
    ctx: &FlowContext,
    repo_root: &Path,
    message: &CommitMessage,
    push_after: bool,
) -> Result<()> {
    create_commit(&ctx.cwd, message)?;
    println!("✔️ Committed with message: {}", message.subject());
    record_event(
        ctx,
        Event::new(EventAction::Commit)
            .with_repo(repo_root)
            .with_details(json!({"subject": message.subject()})),
    );

    if push_after {
        push(&ctx.cwd)?;
        println!("✔️ Pushed");
        record_event(ctx, Event::new(EventAction::Push).with_repo(repo_root));
    }

    Ok(())
}
