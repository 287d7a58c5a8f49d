//! Command implementations for flow.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Each command receives the resolved [`FlowContext`].

mod branch;
mod checkout;
mod clone;
mod commit;
mod tools;
mod youtube;

use crate::cli::{Cli, Command};
use crate::context::FlowContext;
use crate::error::Result;
use clap::CommandFactory;

/// Run a parsed command line.
///
/// With no subcommand the help text is printed.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
        Some(command) => dispatch(command, || FlowContext::resolve(cli.config.as_deref())),
    }
}

/// Dispatch a command to its implementation.
///
/// The context is loaded only for commands that use it, so `version` works
/// even when the config file is broken.
pub fn dispatch<F>(command: Command, load_context: F) -> Result<()>
where
    F: FnOnce() -> Result<FlowContext>,
{
    match command {
        Command::GitCheckout(args) => checkout::cmd_git_checkout(&load_context()?, args),
        Command::BranchFromClipboard => branch::cmd_branch_from_clipboard(&load_context()?),
        Command::Clone(args) => clone::cmd_clone(&load_context()?, args),
        Command::CloneAndOpen(args) => clone::cmd_clone_and_open(&load_context()?, args),
        Command::Commit => commit::cmd_commit(&load_context()?),
        Command::CommitPush => commit::cmd_commit_push(&load_context()?),
        Command::CommitReviewAndPush => commit::cmd_commit_review_and_push(&load_context()?),
        Command::YoutubeToSound(args) => youtube::cmd_youtube_to_sound(&load_context()?, args),
        Command::UpdateGoVersion => tools::cmd_update_go_version(&load_context()?),
        Command::InstallFlow => tools::cmd_install_flow(&load_context()?),
        Command::Version => {
            println!("flow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
