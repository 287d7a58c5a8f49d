//! Clipboard access and branch-name extraction for `branchFromClipboard`.

use crate::error::{FlowError, Result};
use crate::process;

/// Clipboard readers, tried in order among those installed.
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbpaste", &[]),
    ("wl-paste", &[]),
    ("xclip", &["-selection", "clipboard", "-o"]),
];

/// Read the clipboard as text using the first clipboard utility that works.
pub fn read_clipboard_text() -> Result<String> {
    let mut saw_command = false;
    let mut last_err = None;

    for (program, args) in CLIPBOARD_COMMANDS {
        if !process::has_program(program) {
            continue;
        }
        saw_command = true;
        match process::run_capture(program, *args, None) {
            Ok(text) => return Ok(text),
            Err(e) => {
                log::debug!("clipboard reader {} failed: {}", program, e);
                last_err = Some(e);
            }
        }
    }

    if !saw_command {
        return Err(FlowError::ToolError(
            "no clipboard utility found (tried pbpaste, wl-paste, xclip)".to_string(),
        ));
    }

    Err(last_err
        .unwrap_or_else(|| FlowError::ToolError("clipboard appears to be empty".to_string())))
}

/// First non-blank line of `raw`, trimmed, with surrounding quotes removed.
pub fn extract_branch_name(raw: &str) -> String {
    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
        .trim_matches(['"', '\''])
        .to_string()
}

/// Check that a clipboard value looks like a ticket branch (`owner/feature-123`).
pub fn validate_clipboard_branch(branch: &str) -> Result<()> {
    if branch.is_empty() {
        return Err(FlowError::UserError(
            "clipboard does not contain a branch name".to_string(),
        ));
    }
    if !branch.contains('/') {
        return Err(FlowError::UserError(format!(
            "clipboard branch '{}' must contain a '/' (e.g. owner/feature)",
            branch
        )));
    }
    if !branch.chars().any(|c| c.is_numeric()) {
        return Err(FlowError::UserError(format!(
            "clipboard branch '{}' must include a number (e.g. ticket id)",
            branch
        )));
    }
    if branch.chars().any(char::is_whitespace) {
        return Err(FlowError::UserError(format!(
            "clipboard branch '{}' cannot contain spaces; replace them with '-' if needed",
            branch
        )));
    }
    Ok(())
}
