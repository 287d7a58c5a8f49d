//! Implementation of the `flow gitCheckout` command.

use crate::cli::GitCheckoutArgs;
use crate::context::FlowContext;
use crate::error::Result;
use crate::events::{Event, EventAction, record_event};
use crate::refs::{self, CheckoutMode, GitRefBackend, ResolveError, ResolveOptions};
use serde_json::json;

/// Execute the `flow gitCheckout` command.
///
/// Resolves the spec against the repository's remotes, fetches the branch,
/// and switches to it (creating a tracking branch when needed).
pub fn cmd_git_checkout(ctx: &FlowContext, args: GitCheckoutArgs) -> Result<()> {
    // Empty input is rejected before touching the repository at all.
    if args.spec.trim().is_empty() {
        return Err(ResolveError::EmptyBranchName.into());
    }

    let repo_root = ctx.repo_root()?;
    let backend = GitRefBackend::new(&repo_root);
    let options = ResolveOptions {
        remote: args
            .remote
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty()),
        preferred_remote: ctx.config.preferred_remote.clone(),
    };

    let resolved = refs::checkout(&args.spec, &options, &backend)?;

    match resolved.mode {
        CheckoutMode::SwitchExistingLocal => {
            println!("✔️ Switched to {}", resolved.branch);
        }
        CheckoutMode::CreateFromRemote => {
            println!(
                "✔️ Created {} tracking {}",
                resolved.branch,
                resolved.remote_ref()
            );
        }
    }

    record_event(
        ctx,
        Event::new(EventAction::Checkout)
            .with_repo(&repo_root)
            .with_details(json!({
                "spec": args.spec.trim(),
                "remote": resolved.remote,
                "branch": resolved.branch,
                "mode": resolved.mode.to_string(),
            })),
    );

    Ok(())
}
