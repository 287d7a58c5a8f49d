//! `RefBackend` implementation that shells out to git.

use super::error::ResolveError;
use super::resolver::{RefBackend, RemoteProbe};
use crate::git;
use std::path::{Path, PathBuf};

/// Git-backed resolver collaborators for one repository.
#[derive(Debug, Clone)]
pub struct GitRefBackend {
    repo_root: PathBuf,
}

impl GitRefBackend {
    pub fn new<P: AsRef<Path>>(repo_root: P) -> Self {
        Self {
            repo_root: repo_root.as_ref().to_path_buf(),
        }
    }
}

impl RemoteProbe for GitRefBackend {
    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool, ResolveError> {
        git::remote_has_branch(&self.repo_root, remote, branch).map_err(|e| {
            ResolveError::ProbeFailed {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: e.to_string(),
            }
        })
    }
}

impl RefBackend for GitRefBackend {
    fn list_remotes(&self) -> Result<Vec<String>, ResolveError> {
        git::list_remotes(&self.repo_root).map_err(|e| ResolveError::Git(e.to_string()))
    }

    fn fetch_ref(&self, remote: &str, branch: &str) -> Result<(), ResolveError> {
        // A full refname can never be mistaken for an option.
        let source = format!("refs/heads/{}", branch);
        git::run_git(&self.repo_root, &["fetch", remote, &source])
            .map(|_| ())
            .map_err(|e| ResolveError::FetchFailed {
                remote: remote.to_string(),
                branch: branch.to_string(),
                message: e.to_string(),
            })
    }

    fn local_branch_exists(&self, branch: &str) -> Result<bool, ResolveError> {
        git::branch_exists(&self.repo_root, branch).map_err(|e| {
            ResolveError::Git(format!("check local branch {}: {}", branch, e))
        })
    }

    fn remote_tracking_exists(&self, remote: &str, branch: &str) -> Result<bool, ResolveError> {
        let full_ref = format!("refs/remotes/{}/{}", remote, branch);
        git::ref_exists(&self.repo_root, &full_ref).map_err(|e| {
            ResolveError::Git(format!("check remote branch {}/{}: {}", remote, branch, e))
        })
    }

    fn checkout(&self, branch: &str) -> Result<(), ResolveError> {
        git::run_git(&self.repo_root, &["checkout", branch])
            .map(|_| ())
            .map_err(|e| ResolveError::Git(e.to_string()))
    }

    fn checkout_new_tracking(&self, branch: &str, remote_ref: &str) -> Result<(), ResolveError> {
        git::run_git(
            &self.repo_root,
            &["checkout", "--track", "-b", branch, remote_ref],
        )
        .map(|_| ())
        .map_err(|e| ResolveError::Git(e.to_string()))
    }
}
