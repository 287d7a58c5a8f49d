//! Error types for the flow CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::refs::ResolveError;
use thiserror::Error;

/// Main error type for flow operations.
///
/// Each variant maps to a specific process exit code (see `exit_codes`).
#[derive(Error, Debug)]
pub enum FlowError {
    /// User provided invalid arguments or the environment is in an invalid state.
    #[error("{0}")]
    UserError(String),

    /// Configuration could not be read or failed validation.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Git operation failed.
    #[error("Git operation failed: {0}")]
    GitError(String),

    /// Branch reference resolution or checkout failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// An external program (yt-dlp, osascript, task, editor, ...) failed or is missing.
    #[error("{0}")]
    ToolError(String),

    /// The completion API request failed or returned an unusable response.
    #[error("OpenAI request failed: {0}")]
    ApiError(String),

    /// Local filesystem or terminal I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FlowError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowError::UserError(_) => exit_codes::USER_ERROR,
            FlowError::ConfigError(_) => exit_codes::CONFIG_ERROR,
            FlowError::GitError(_) => exit_codes::GIT_FAILURE,
            FlowError::Resolve(err) if err.is_input_error() => exit_codes::USER_ERROR,
            FlowError::Resolve(_) => exit_codes::GIT_FAILURE,
            FlowError::ToolError(_) => exit_codes::TOOL_FAILURE,
            FlowError::ApiError(_) => exit_codes::API_FAILURE,
            FlowError::Io(_) => exit_codes::USER_ERROR,
        }
    }
}

/// Result type alias for flow operations.
pub type Result<T> = std::result::Result<T, FlowError>;
