//! Implementation of the `flow clone` and `flow cloneAndOpen` commands.

use crate::browser::safari_front_url;
use crate::cli::{CloneAndOpenArgs, CloneArgs};
use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use crate::events::{Event, EventAction, record_event};
use crate::git::run_git;
use crate::github::GitHubRepo;
use crate::process;
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the `flow clone` command.
pub fn cmd_clone(ctx: &FlowContext, args: CloneArgs) -> Result<()> {
    let target = clone_repository(ctx, &args.url)?;
    println!("✔️ Cloned to {}", target.display());
    Ok(())
}

/// Execute the `flow cloneAndOpen` command.
///
/// Without a URL argument the frontmost Safari tab is used.
pub fn cmd_clone_and_open(ctx: &FlowContext, args: CloneAndOpenArgs) -> Result<()> {
    let input = match args.url {
        Some(url) => url,
        None => {
            let url = safari_front_url()?;
            println!("ℹ️ Using Safari URL {}", url);
            url
        }
    };

    let target = clone_repository(ctx, &input)?;
    println!("✔️ Cloned to {}", target.display());

    let app = Path::new(&ctx.config.editor_app);
    open_in_app(app, &target)?;
    println!("✔️ Opened {} in {}", target.display(), app_display_name(app));

    Ok(())
}

/// Parse `input`, clone it under the clone root, and return the checkout path.
fn clone_repository(ctx: &FlowContext, input: &str) -> Result<PathBuf> {
    let repo = GitHubRepo::parse(input)?;
    let target = repo.target_dir(&ctx.clone_root());

    clone_into(&repo.clone_url, &target)?;

    record_event(
        ctx,
        Event::new(EventAction::Clone)
            .with_repo(&target)
            .with_details(json!({
                "owner": repo.owner,
                "repo": repo.repo,
                "url": repo.clone_url,
            })),
    );

    Ok(target)
}

/// `git clone <url> <target>`, refusing to touch an existing target.
fn clone_into(clone_url: &str, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            FlowError::UserError(format!("failed to create '{}': {}", parent.display(), e))
        })?;
    }

    if target.is_dir() {
        return Err(FlowError::UserError(format!(
            "destination {} already exists",
            target.display()
        )));
    }
    if target.exists() {
        return Err(FlowError::UserError(format!(
            "destination {} exists and is not a directory",
            target.display()
        )));
    }

    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    let target_str = target.to_string_lossy();
    run_git(parent, &["clone", "--quiet", clone_url, &target_str])?;
    Ok(())
}

/// `open -a <app> <path>` (macOS).
fn open_in_app(app: &Path, path: &Path) -> Result<()> {
    if !app.exists() {
        return Err(FlowError::ToolError(format!(
            "{} not found at {}",
            app_display_name(app),
            app.display()
        )));
    }

    let app_str = app.to_string_lossy();
    let path_str = path.to_string_lossy();
    process::run_streaming("open", &["-a", &app_str, &path_str], None)
}

/// `Cursor` for `/Applications/Cursor.app`.
fn app_display_name(app: &Path) -> String {
    app.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| app.display().to_string())
}
