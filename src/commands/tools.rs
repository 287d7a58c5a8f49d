//! Implementations of `flow updateGoVersion` and `flow install-flow`.

use crate::context::FlowContext;
use crate::error::{FlowError, Result};
use crate::events::{Event, EventAction, record_event};
use crate::process;
use serde_json::json;
use std::fs;
use std::path::Path;

const INSTALL_TASK: &str = "install-flow";

/// Execute the `flow updateGoVersion` command.
pub fn cmd_update_go_version(ctx: &FlowContext) -> Result<()> {
    let script = ctx.upgrade_go_script();
    if !script.is_file() {
        return Err(FlowError::UserError(format!(
            "Go upgrade script not found at {}",
            script.display()
        )));
    }

    let script_str = script.to_string_lossy();
    process::run_streaming::<&str>(&script_str, &[], Some(&ctx.cwd))?;

    record_event(
        ctx,
        Event::new(EventAction::UpdateGo)
            .with_details(json!({"script": script.display().to_string()})),
    );
    Ok(())
}

/// Execute the `flow install-flow` command.
pub fn cmd_install_flow(ctx: &FlowContext) -> Result<()> {
    let taskfile = ctx.taskfile();
    check_taskfile(&taskfile)?;
    process::find_program("task")?;

    let taskfile_dir = taskfile.parent().unwrap_or(ctx.cwd.as_path());
    process::run_streaming("task", &[INSTALL_TASK], Some(taskfile_dir))?;

    record_event(
        ctx,
        Event::new(EventAction::InstallFlow)
            .with_details(json!({"taskfile": taskfile.display().to_string()})),
    );
    Ok(())
}

/// The Taskfile must exist and define the install task.
fn check_taskfile(path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            FlowError::UserError(format!("{} not found", path.display()))
        } else {
            FlowError::UserError(format!("failed to read {}: {}", path.display(), e))
        }
    })?;

    if !contents.contains(INSTALL_TASK) {
        return Err(FlowError::UserError(format!(
            "{} does not define an {} task",
            path.display(),
            INSTALL_TASK
        )));
    }
    Ok(())
}
