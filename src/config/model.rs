//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for flow.
///
/// This struct represents the contents of `~/.flow/config.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
/// Path-valued fields may start with `~/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Git settings
    // =========================================================================
    /// Remote used by `gitCheckout` when the spec does not pin one.
    #[serde(default = "default_preferred_remote")]
    pub preferred_remote: String,

    /// Directory under which `clone` creates `<owner>/<repo>`.
    #[serde(default = "default_clone_root")]
    pub clone_root: String,

    /// Application bundle `cloneAndOpen` opens the checkout with.
    #[serde(default = "default_editor_app")]
    pub editor_app: String,

    // =========================================================================
    // Commit message generation
    // =========================================================================
    /// Chat model used to write commit messages.
    #[serde(default = "default_commit_model")]
    pub commit_model: String,

    /// Staged diff is truncated to this many characters before sending.
    #[serde(default = "default_max_commit_diff_chars")]
    pub max_commit_diff_chars: usize,

    /// Base URL of the chat-completions API.
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Request timeout for commit message generation.
    #[serde(default = "default_commit_timeout_secs")]
    pub commit_timeout_secs: u64,

    // =========================================================================
    // Media
    // =========================================================================
    /// Where `youtubeToSound` writes audio files.
    #[serde(default = "default_youtube_sound_dir")]
    pub youtube_sound_dir: String,

    /// Browser passed to `yt-dlp --cookies-from-browser` (`none` disables).
    #[serde(default = "default_youtube_cookies_browser")]
    pub youtube_cookies_browser: String,

    // =========================================================================
    // Tooling
    // =========================================================================
    /// Script run by `updateGoVersion`.
    #[serde(default = "default_upgrade_go_script")]
    pub upgrade_go_script: String,

    /// Taskfile consulted by `install-flow`, relative to the working directory.
    #[serde(default = "default_taskfile")]
    pub taskfile: String,

    // =========================================================================
    // Audit log
    // =========================================================================
    /// Whether completed commands are appended to the events file.
    #[serde(default = "default_true")]
    pub events_enabled: bool,

    /// NDJSON audit log location.
    #[serde(default = "default_events_file")]
    pub events_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preferred_remote: default_preferred_remote(),
            clone_root: default_clone_root(),
            editor_app: default_editor_app(),
            commit_model: default_commit_model(),
            max_commit_diff_chars: default_max_commit_diff_chars(),
            openai_base_url: default_openai_base_url(),
            commit_timeout_secs: default_commit_timeout_secs(),
            youtube_sound_dir: default_youtube_sound_dir(),
            youtube_cookies_browser: default_youtube_cookies_browser(),
            upgrade_go_script: default_upgrade_go_script(),
            taskfile: default_taskfile(),
            events_enabled: default_true(),
            events_file: default_events_file(),
        }
    }
}
