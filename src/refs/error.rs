//! Error kinds produced while resolving and checking out a branch spec.

use thiserror::Error;

/// Why a branch spec could not be resolved or checked out.
///
/// Every failure is a distinct variant so callers can render a message and
/// pick an exit status without string matching.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("branch name cannot be empty")]
    EmptyBranchName,

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("expected github.com host, got '{host}'")]
    UnsupportedHost { host: String },

    #[error("unsupported GitHub tree URL path '{path}' (expected /<owner>/<repo>/tree/<branch>)")]
    UnsupportedPath { path: String },

    #[error("'{branch}' is not a valid branch name")]
    InvalidBranchName { branch: String },

    #[error("could not determine a branch name from the GitHub tree URL")]
    NoBranchCandidates,

    #[error("git remote '{remote}' not found")]
    RemoteNotFound { remote: String },

    #[error("no git remotes configured")]
    NoRemotesConfigured,

    #[error("checking {remote}/{branch} on the remote failed: {message}")]
    ProbeFailed {
        remote: String,
        branch: String,
        message: String,
    },

    #[error("git fetch {remote} {branch} failed: {message}")]
    FetchFailed {
        remote: String,
        branch: String,
        message: String,
    },

    #[error("remote branch {remote_ref} not found after fetch")]
    BranchNotFound { remote_ref: String },

    /// A local git operation (listing remotes, ref lookup, checkout) failed.
    #[error("{0}")]
    Git(String),
}

impl ResolveError {
    /// True for errors caused by the user's input rather than repository or
    /// remote state.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ResolveError::EmptyBranchName
                | ResolveError::InvalidUrl { .. }
                | ResolveError::UnsupportedHost { .. }
                | ResolveError::UnsupportedPath { .. }
                | ResolveError::InvalidBranchName { .. }
                | ResolveError::NoBranchCandidates
                | ResolveError::RemoteNotFound { .. }
                | ResolveError::NoRemotesConfigured
        )
    }
}
