//! CLI argument parsing for flow.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::config::types::CONFIG_PATH_ENV;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// flow: everyday git, GitHub, and media chores behind one binary.
#[derive(Parser, Debug)]
#[command(name = "flow")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (every git and external command is printed).
    #[arg(short, long, global = true, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Path to the config file (default: ~/.flow/config.yaml).
    #[arg(long, global = true, env = CONFIG_PATH_ENV, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands for flow.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check out a branch by name, `remote/branch`, or GitHub tree URL.
    ///
    /// Fetches the branch from the selected remote, then switches to the
    /// local branch if it exists or creates a tracking branch otherwise.
    #[command(name = "gitCheckout", alias = "git-checkout")]
    GitCheckout(GitCheckoutArgs),

    /// Create or switch to the branch named on the clipboard.
    ///
    /// The clipboard value must contain a '/' and a number (e.g. `me/ENG-42`).
    #[command(name = "branchFromClipboard", alias = "branch-from-clipboard")]
    BranchFromClipboard,

    /// Clone a GitHub repository into <clone_root>/<owner>/<repo>.
    #[command(name = "clone")]
    Clone(CloneArgs),

    /// Clone a GitHub repository and open it in the editor app.
    ///
    /// Without a URL, the frontmost Safari tab is used.
    #[command(name = "cloneAndOpen", alias = "clone-and-open")]
    CloneAndOpen(CloneAndOpenArgs),

    /// Stage all changes and commit with a generated message.
    #[command(name = "commit")]
    Commit,

    /// Commit with a generated message, then push.
    #[command(name = "commitPush", alias = "commit-push")]
    CommitPush,

    /// Review (accept, cancel, or edit) a generated message, commit, then push.
    #[command(name = "commitReviewAndPush", alias = "commit-review-and-push")]
    CommitReviewAndPush,

    /// Extract mp3 audio from a video URL with yt-dlp.
    ///
    /// Without a URL, the frontmost Safari tab is used. Arguments after the
    /// URL are passed through to yt-dlp.
    #[command(name = "youtubeToSound", alias = "youtube-to-sound")]
    YoutubeToSound(YoutubeToSoundArgs),

    /// Run the Go toolchain upgrade script.
    #[command(name = "updateGoVersion", alias = "update-go-version")]
    UpdateGoVersion,

    /// Rebuild and install flow via `task install-flow`.
    #[command(name = "install-flow", alias = "installFlow")]
    InstallFlow,

    /// Print the flow version.
    #[command(name = "version")]
    Version,
}

/// Arguments for the `gitCheckout` command.
#[derive(Parser, Debug)]
pub struct GitCheckoutArgs {
    /// Branch name, `remote/branch`, or GitHub tree URL.
    pub spec: String,

    /// Remote to fetch from; must be configured (overrides any prefix in the spec).
    #[arg(long)]
    pub remote: Option<String>,
}

/// Arguments for the `clone` command.
#[derive(Parser, Debug)]
pub struct CloneArgs {
    /// GitHub URL (`https://github.com/owner/repo`, `git@github.com:owner/repo.git`) or `owner/repo`.
    pub url: String,
}

/// Arguments for the `cloneAndOpen` command.
#[derive(Parser, Debug)]
pub struct CloneAndOpenArgs {
    /// GitHub URL or `owner/repo`; defaults to the frontmost Safari tab.
    pub url: Option<String>,
}

/// Arguments for the `youtubeToSound` command.
#[derive(Parser, Debug)]
pub struct YoutubeToSoundArgs {
    /// Video URL followed by extra yt-dlp arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "URL [YT-DLP ARGS]")]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
