//! Runner for external programs other than git.
//!
//! Mirrors `git::run_git`: every invocation is logged at debug level and a
//! failure becomes a `FlowError::ToolError` carrying the program's stderr.

use crate::error::{FlowError, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Locate `program` on `PATH`.
pub fn find_program(program: &str) -> Result<PathBuf> {
    which::which(program).map_err(|_| {
        FlowError::ToolError(format!("{} not found in PATH", program))
    })
}

/// Whether `program` is available on `PATH`.
pub fn has_program(program: &str) -> bool {
    which::which(program).is_ok()
}

fn describe<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}

/// Run a program and capture its stdout (untrimmed).
///
/// # Returns
///
/// * `Ok(String)` - Standard output on exit code 0
/// * `Err(FlowError::ToolError)` - Spawn failure or non-zero exit
pub fn run_capture<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: Option<&Path>) -> Result<String> {
    log::debug!("$ {}", describe(program, args));

    let mut command = Command::new(program);
    command.args(args);
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    let output = command
        .output()
        .map_err(|e| FlowError::ToolError(format!("failed to execute {}: {}", program, e)))?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let exit_code = output.status.code().unwrap_or(-1);
    Err(FlowError::ToolError(if stderr.is_empty() {
        format!("{} failed (exit code {})", program, exit_code)
    } else {
        format!("{} failed (exit code {}): {}", program, exit_code, stderr)
    }))
}

/// Run a program with stdio inherited from the flow process.
pub fn run_streaming<S: AsRef<OsStr>>(program: &str, args: &[S], cwd: Option<&Path>) -> Result<()> {
    log::debug!("$ {}", describe(program, args));

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    let status = command
        .status()
        .map_err(|e| FlowError::ToolError(format!("failed to execute {}: {}", program, e)))?;

    if status.success() {
        Ok(())
    } else {
        Err(FlowError::ToolError(format!(
            "{} failed (exit code {})",
            program,
            status.code().unwrap_or(-1)
        )))
    }
}
