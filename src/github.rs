//! GitHub repository references for `clone`.
//!
//! Accepts the three shapes people paste into a terminal:
//!
//! - `git@github.com:<owner>/<repo>.git`
//! - `https://github.com/<owner>/<repo>` (optionally `.git`, trailing `/`)
//! - `<owner>/<repo>`
//!
//! SSH input is cloned verbatim; every other shape is normalized to
//! `https://github.com/<owner>/<repo>`.

use crate::error::{FlowError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Characters GitHub permits in owner and repository names.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid repository name regex"));

const SSH_PREFIX: &str = "git@github.com:";

/// A GitHub repository identified by owner and name, plus the URL to clone it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubRepo {
    pub owner: String,
    pub repo: String,
    pub clone_url: String,
}

impl GitHubRepo {
    /// Parse user input into a repository reference.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FlowError::UserError(
                "repository URL cannot be empty".to_string(),
            ));
        }

        if input.starts_with("git@") {
            let path = input.strip_prefix(SSH_PREFIX).ok_or_else(|| {
                FlowError::UserError(format!("unsupported git host in '{}'", input))
            })?;
            let (owner, repo) = split_owner_repo(path)?;
            return Ok(Self {
                owner,
                repo,
                clone_url: input.to_string(),
            });
        }

        let path = if let Some(rest) = input
            .strip_prefix("https://")
            .or_else(|| input.strip_prefix("http://"))
        {
            let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
            let host = host.to_ascii_lowercase();
            if host != "github.com" && host != "www.github.com" {
                return Err(FlowError::UserError(format!(
                    "expected github.com host, got '{}'",
                    host
                )));
            }
            // Query and fragment never name part of the repository.
            path.split(['?', '#']).next().unwrap_or("")
        } else {
            input
        };

        let (owner, repo) = split_owner_repo(path)?;
        let clone_url = format!("https://github.com/{}/{}", owner, repo);
        Ok(Self {
            owner,
            repo,
            clone_url,
        })
    }

    /// Checkout location: `<root>/<owner>/<repo>`.
    pub fn target_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.owner).join(&self.repo)
    }
}

fn split_owner_repo(path: &str) -> Result<(String, String)> {
    let trimmed = path.trim_matches('/');
    let invalid = || FlowError::UserError(format!("invalid GitHub repository path: '{}'", path));

    if trimmed.is_empty() {
        return Err(invalid());
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    match parts.len() {
        0 | 1 => return Err(invalid()),
        2 => {}
        _ => {
            return Err(FlowError::UserError(format!(
                "unexpected extra path components in '{}'",
                path
            )));
        }
    }

    let owner = parts[0];
    let repo = parts[1].strip_suffix(".git").unwrap_or(parts[1]);

    for name in [owner, repo] {
        if name == "." || name == ".." || !NAME_RE.is_match(name) {
            return Err(invalid());
        }
    }

    Ok((owner.to_string(), repo.to_string()))
}
