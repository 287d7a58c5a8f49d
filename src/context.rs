//! Invocation context for flow commands.
//!
//! A [`FlowContext`] is resolved once per invocation and passed to every
//! command. It carries the loaded configuration, the home and working
//! directories, and the OpenAI API key, so nothing downstream reads process
//! environment or global state on its own.

use crate::config::Config;
use crate::config::types::OPENAI_API_KEY_ENV;
use crate::error::{FlowError, Result};
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Request-scoped configuration for a single flow invocation.
#[derive(Debug, Clone)]
pub struct FlowContext {
    /// Loaded configuration with environment overrides applied.
    pub config: Config,

    /// Home directory used to expand `~/` in config paths.
    pub home_dir: PathBuf,

    /// Directory the command operates in.
    pub cwd: PathBuf,

    /// `OPENAI_API_KEY`, if set and non-blank.
    openai_api_key: Option<String>,
}

impl FlowContext {
    pub fn new(
        config: Config,
        home_dir: PathBuf,
        cwd: PathBuf,
        openai_api_key: Option<String>,
    ) -> Self {
        Self {
            config,
            home_dir,
            cwd,
            openai_api_key: openai_api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Resolve the context from the process environment.
    ///
    /// `config_path` is the explicit `--config` / `FLOW_CONFIG` path, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(FlowContext)` - Successfully resolved context
    /// * `Err(FlowError::UserError)` - No home directory or working directory
    /// * `Err(FlowError::ConfigError)` - Config file unreadable or invalid
    pub fn resolve(config_path: Option<&Path>) -> Result<Self> {
        let home_dir = home::home_dir().ok_or_else(|| {
            FlowError::UserError("could not determine the home directory".to_string())
        })?;

        let cwd = env::current_dir().map_err(|e| {
            FlowError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let mut config = Config::discover(config_path, &home_dir)?;
        config.apply_env_overrides(|key| env::var(key).ok());

        let api_key = env::var(OPENAI_API_KEY_ENV).ok();

        Ok(Self::new(config, home_dir, cwd, api_key))
    }

    /// Root of the git repository containing the working directory.
    pub fn repo_root(&self) -> Result<PathBuf> {
        git::get_repo_root(&self.cwd)
    }

    /// The OpenAI API key, or a user error explaining how to set it.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            FlowError::UserError(format!(
                "{} is not set.\n\nExport your OpenAI API key to generate commit messages.",
                OPENAI_API_KEY_ENV
            ))
        })
    }

    pub fn clone_root(&self) -> PathBuf {
        self.config.clone_root_path(&self.home_dir)
    }

    pub fn youtube_sound_dir(&self) -> PathBuf {
        self.config.youtube_sound_path(&self.home_dir)
    }

    pub fn upgrade_go_script(&self) -> PathBuf {
        self.config.upgrade_go_script_path(&self.home_dir)
    }

    pub fn events_file(&self) -> PathBuf {
        self.config.events_file_path(&self.home_dir)
    }

    /// Taskfile path; relative values resolve against the working directory.
    pub fn taskfile(&self) -> PathBuf {
        let path = crate::config::expand_home(&self.config.taskfile, &self.home_dir);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}
