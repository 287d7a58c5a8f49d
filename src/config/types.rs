//! Configuration constants and default value functions used by `Config`.

/// Environment variable that points at an alternate config file.
pub const CONFIG_PATH_ENV: &str = "FLOW_CONFIG";

/// Environment variable that overrides `youtube_cookies_browser`.
pub const COOKIES_BROWSER_ENV: &str = "FLOW_YOUTUBE_COOKIES_BROWSER";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Config file location relative to the home directory.
pub const DEFAULT_CONFIG_PATH: &str = "~/.flow/config.yaml";

/// Cookie-browser value that disables `--cookies-from-browser`.
pub const COOKIES_DISABLED: &str = "none";

// Default value functions for serde
pub(crate) fn default_preferred_remote() -> String {
    "origin".to_string()
}
pub(crate) fn default_clone_root() -> String {
    "~/gh".to_string()
}
pub(crate) fn default_editor_app() -> String {
    "/Applications/Cursor.app".to_string()
}
pub(crate) fn default_youtube_sound_dir() -> String {
    "~/.flow/youtube-sound".to_string()
}
pub(crate) fn default_youtube_cookies_browser() -> String {
    "safari".to_string()
}
pub(crate) fn default_commit_model() -> String {
    "gpt-5-nano".to_string()
}
pub(crate) fn default_max_commit_diff_chars() -> usize {
    12000
}
pub(crate) fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
pub(crate) fn default_commit_timeout_secs() -> u64 {
    45
}
pub(crate) fn default_upgrade_go_script() -> String {
    "~/src/config/sh/upgrade-go-version.sh".to_string()
}
pub(crate) fn default_taskfile() -> String {
    "Taskfile.yml".to_string()
}
pub(crate) fn default_events_file() -> String {
    "~/.flow/events.ndjson".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
