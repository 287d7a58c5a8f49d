//! Commit message shaping: diff truncation, quote stripping, paragraph split.

use crate::error::{FlowError, Result};

/// A commit message ready for `git commit`, one `-m` per paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    text: String,
    paragraphs: Vec<String>,
}

impl CommitMessage {
    /// Build a message from user-provided text (e.g. an edited message).
    pub fn new(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(FlowError::UserError("commit message is empty".to_string()));
        }

        let paragraphs = split_paragraphs(text);
        if paragraphs.is_empty() {
            return Err(FlowError::UserError(
                "commit message is empty after formatting".to_string(),
            ));
        }

        Ok(Self {
            text: text.to_string(),
            paragraphs,
        })
    }

    /// Build a message from model output, which may arrive wrapped in quotes.
    pub fn from_model_output(raw: &str) -> Result<Self> {
        Self::new(trim_matching_quotes(raw.trim()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// First paragraph, used in the success line.
    pub fn subject(&self) -> &str {
        self.paragraphs.first().map(String::as_str).unwrap_or("")
    }

    /// Arguments for `git commit`.
    pub fn commit_args(&self) -> Vec<&str> {
        let mut args = vec!["commit"];
        for paragraph in &self.paragraphs {
            args.push("-m");
            args.push(paragraph);
        }
        args
    }
}

/// Truncate `diff` to at most `max_chars` characters.
///
/// Returns the (possibly shortened) diff and whether it was truncated. A
/// truncated diff ends with a note naming the limit.
pub fn truncate_diff(diff: &str, max_chars: usize) -> (String, bool) {
    match diff.char_indices().nth(max_chars) {
        None => (diff.to_string(), false),
        Some((cut, _)) => (
            format!(
                "{}\n\n[Diff truncated to the first {} characters]",
                &diff[..cut],
                max_chars
            ),
            true,
        ),
    }
}

/// Remove one pair of matching `"` or `'` around the whole message.
pub fn trim_matching_quotes(message: &str) -> &str {
    for quote in ['"', '\''] {
        if message.len() >= 2
            && let Some(inner) = message
                .strip_prefix(quote)
                .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    message
}

/// Split on blank lines; trailing spaces and tabs are trimmed from each line.
pub fn split_paragraphs(message: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in message.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(line.trim_end_matches([' ', '\t']));
    }

    if !current.is_empty() {
        paragraphs.push(current.join("\n"));
    }

    paragraphs
}
