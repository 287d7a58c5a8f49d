//! Config loading, validation, and path utilities.

use super::model::Config;
use super::types::{COOKIES_BROWSER_ENV, DEFAULT_CONFIG_PATH};
use crate::error::{FlowError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(FlowError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FlowError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Locate and load the config file.
    ///
    /// An explicitly given path (from `--config` or `FLOW_CONFIG`) must exist.
    /// The default `~/.flow/config.yaml` is optional; when it is missing all
    /// defaults apply.
    pub fn discover(explicit: Option<&Path>, home: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            log::debug!("Loading config from {}", path.display());
            return Self::load(path);
        }

        let default_path = expand_home(DEFAULT_CONFIG_PATH, home);
        if default_path.exists() {
            log::debug!("Loading config from {}", default_path.display());
            Self::load(&default_path)
        } else {
            log::debug!("No config at {}, using defaults", default_path.display());
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document for a struct; treat it as "all defaults".
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| FlowError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `preferred_remote` must be non-empty and contain no `/` or whitespace
    /// - `max_commit_diff_chars` must be positive
    /// - `commit_timeout_secs` must be positive
    /// - `openai_base_url` must be an http(s) URL
    pub fn validate(&self) -> Result<()> {
        let remote = self.preferred_remote.trim();
        if remote.is_empty() {
            return Err(FlowError::ConfigError(
                "preferred_remote must not be empty".to_string(),
            ));
        }
        if remote.contains('/') || remote.chars().any(char::is_whitespace) {
            return Err(FlowError::ConfigError(format!(
                "preferred_remote '{}' is not a valid remote name",
                self.preferred_remote
            )));
        }

        if self.max_commit_diff_chars == 0 {
            return Err(FlowError::ConfigError(
                "max_commit_diff_chars must be greater than 0".to_string(),
            ));
        }

        if self.commit_timeout_secs == 0 {
            return Err(FlowError::ConfigError(
                "commit_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(self.openai_base_url.starts_with("https://")
            || self.openai_base_url.starts_with("http://"))
        {
            return Err(FlowError::ConfigError(format!(
                "openai_base_url '{}' must start with http:// or https://",
                self.openai_base_url
            )));
        }

        Ok(())
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(browser) = lookup(COOKIES_BROWSER_ENV) {
            let browser = browser.trim();
            if !browser.is_empty() {
                self.youtube_cookies_browser = browser.to_string();
            }
        }
    }

    pub fn clone_root_path(&self, home: &Path) -> PathBuf {
        expand_home(&self.clone_root, home)
    }

    pub fn youtube_sound_path(&self, home: &Path) -> PathBuf {
        expand_home(&self.youtube_sound_dir, home)
    }

    pub fn upgrade_go_script_path(&self, home: &Path) -> PathBuf {
        expand_home(&self.upgrade_go_script, home)
    }

    pub fn events_file_path(&self, home: &Path) -> PathBuf {
        expand_home(&self.events_file, home)
    }
}

/// Expand a leading `~` or `~/` against `home`; other paths are returned as-is.
pub fn expand_home(raw: &str, home: &Path) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
