//! Interactive review of a generated commit message.

use super::message::CommitMessage;
use crate::error::{FlowError, Result};
use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

const RULE_WIDTH: usize = 60;

/// Environment variables consulted for the editor, in order.
pub const EDITOR_ENV_VARS: &[&str] = &["GIT_EDITOR", "VISUAL", "EDITOR"];

/// What the user decided in the review loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Accept(CommitMessage),
    Cancel,
}

/// Show `message` and loop until the user accepts, cancels, or edits it.
///
/// `edit` receives the current text and returns the edited text; an empty
/// edit keeps the previous message.
pub fn review_message<R, W, E>(
    message: CommitMessage,
    input: &mut R,
    out: &mut W,
    mut edit: E,
) -> Result<ReviewOutcome>
where
    R: BufRead,
    W: Write,
    E: FnMut(&str) -> Result<String>,
{
    let mut current = message;
    let rule = "─".repeat(RULE_WIDTH);

    loop {
        writeln!(out, "{rule}")?;
        writeln!(out, "Review commit message:")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "{}", current.text())?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Options: [y] commit  [n] cancel  [e] edit message")?;
        write!(out, "Choice [y/n/e]: ")?;
        out.flush()?;

        match read_choice(input)?.as_str() {
            "y" | "yes" => return Ok(ReviewOutcome::Accept(current)),
            "n" | "no" => return Ok(ReviewOutcome::Cancel),
            "e" | "edit" => {
                let edited = edit(current.text())?;
                if edited.trim().is_empty() {
                    writeln!(out, "Edited message is empty; keeping previous message.")?;
                    continue;
                }
                current = CommitMessage::new(&edited)?;
            }
            _ => writeln!(out, "Please choose y, n, or e.")?,
        }
    }
}

/// Next non-blank line, lower-cased.
fn read_choice<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(FlowError::UserError(
                "input closed before a choice was made".to_string(),
            ));
        }
        let choice = line.trim();
        if !choice.is_empty() {
            return Ok(choice.to_ascii_lowercase());
        }
    }
}

/// Editor command from the first non-blank of `GIT_EDITOR`, `VISUAL`, `EDITOR`; else `vi`.
pub fn find_editor<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    EDITOR_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| "vi".to_string())
}

/// Open `current` in `editor` via a temporary file and return the saved text.
///
/// `editor` is split with shell quoting rules, so values like `code --wait`
/// work; the temp file path is appended as the last argument.
pub fn edit_in_editor(editor: &str, current: &str) -> Result<String> {
    let words = shell_words::split(editor).map_err(|e| {
        FlowError::UserError(format!("invalid editor command '{}': {}", editor, e))
    })?;
    let (program, args) = words.split_first().ok_or_else(|| {
        FlowError::UserError("editor command is empty".to_string())
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("flow-commit-")
        .suffix(".md")
        .tempfile()?;
    writeln!(file, "{}", current)?;
    file.flush()?;

    log::debug!("$ {} {}", editor, file.path().display());
    let status = Command::new(program)
        .args(args)
        .arg(file.path())
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| FlowError::ToolError(format!("failed to launch editor '{}': {}", program, e)))?;

    if !status.success() {
        return Err(FlowError::ToolError(format!(
            "editor '{}' exited with code {}",
            program,
            status.code().unwrap_or(-1)
        )));
    }

    Ok(std::fs::read_to_string(file.path())?)
}
