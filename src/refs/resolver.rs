//! Branch spec resolution and checkout.
//!
//! Resolution runs in fixed order and is fully sequential:
//!
//! 1. classify the spec (no git access; empty input fails here)
//! 2. list remotes once
//! 3. pin or select the remote
//! 4. for tree URLs, probe candidates in order (first hit wins, first
//!    candidate on total miss)
//! 5. fetch, then decide between switching to a local branch and creating a
//!    tracking branch
//!
//! Nothing is cached or retried. All repository and network access goes
//! through [`RefBackend`], so the whole flow can be driven by an in-memory
//! backend in tests.

use super::error::ResolveError;
use super::ref_spec::{BranchCandidates, RefSpec, looks_like_option, split_remote_prefix};
use super::remote::{DEFAULT_REMOTE, select_remote};
use std::fmt;

/// Answers "does branch B exist on remote R" (one network round trip).
pub trait RemoteProbe {
    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool, ResolveError>;
}

/// Everything the resolver needs from a repository.
pub trait RefBackend: RemoteProbe {
    /// Configured remotes in listing order.
    fn list_remotes(&self) -> Result<Vec<String>, ResolveError>;

    fn fetch_ref(&self, remote: &str, branch: &str) -> Result<(), ResolveError>;

    /// Whether `refs/heads/<branch>` exists.
    fn local_branch_exists(&self, branch: &str) -> Result<bool, ResolveError>;

    /// Whether `refs/remotes/<remote>/<branch>` exists.
    fn remote_tracking_exists(&self, remote: &str, branch: &str) -> Result<bool, ResolveError>;

    fn checkout(&self, branch: &str) -> Result<(), ResolveError>;

    fn checkout_new_tracking(&self, branch: &str, remote_ref: &str) -> Result<(), ResolveError>;
}

/// Caller-supplied knobs for resolution.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Explicitly requested remote. Must be configured; disables
    /// `remote/branch` prefix splitting.
    pub remote: Option<String>,
    /// Remote to use when nothing is pinned, if configured.
    pub preferred_remote: String,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            remote: None,
            preferred_remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

/// Remote and branch chosen for a spec, before anything is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutTarget {
    pub remote: String,
    pub branch: String,
}

/// How the branch will be checked out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutMode {
    /// A local branch with this name exists; switch to it as-is.
    SwitchExistingLocal,
    /// Create a new local branch tracking `<remote>/<branch>`.
    CreateFromRemote,
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutMode::SwitchExistingLocal => write!(f, "switch_existing_local"),
            CheckoutMode::CreateFromRemote => write!(f, "create_from_remote"),
        }
    }
}

/// Final checkout decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCheckout {
    pub remote: String,
    pub branch: String,
    pub mode: CheckoutMode,
}

impl ResolvedCheckout {
    /// `<remote>/<branch>`, the remote-tracking ref name.
    pub fn remote_ref(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }
}

/// Decide remote and branch for a classified spec.
///
/// Pure apart from `probe`, which is consulted only for tree URLs.
pub fn plan_checkout<P: RemoteProbe + ?Sized>(
    spec: &RefSpec,
    remotes: &[String],
    options: &ResolveOptions,
    probe: &P,
) -> Result<CheckoutTarget, ResolveError> {
    let (pinned, candidates, needs_probe) = match spec {
        RefSpec::Direct(raw) if options.remote.is_some() => (
            options.remote.clone(),
            BranchCandidates::single(raw.clone()),
            false,
        ),
        RefSpec::Direct(raw) => {
            let (pinned, branch) = split_remote_prefix(raw, remotes);
            (pinned, BranchCandidates::single(branch), false)
        }
        RefSpec::TreeUrl(candidates) => (options.remote.clone(), candidates.clone(), true),
    };

    if !needs_probe && looks_like_option(candidates.first()) {
        return Err(ResolveError::InvalidBranchName {
            branch: candidates.first().to_string(),
        });
    }

    let remote = select_remote(remotes, pinned.as_deref(), &options.preferred_remote)?;

    let branch = if needs_probe {
        pick_candidate(&remote, &candidates, probe)?
    } else {
        candidates.first().to_string()
    };

    log::debug!("Resolved spec to {}/{}", remote, branch);
    Ok(CheckoutTarget { remote, branch })
}

/// Probe candidates against `remote` in order and return the first that
/// exists there, or the first candidate when none do.
///
/// Falling back instead of failing lets a branch that has not been pushed
/// yet reach the fetch step, which reports the real error.
pub fn pick_candidate<P: RemoteProbe + ?Sized>(
    remote: &str,
    candidates: &BranchCandidates,
    probe: &P,
) -> Result<String, ResolveError> {
    for candidate in candidates.as_slice() {
        let exists = probe
            .remote_has_branch(remote, candidate)
            .map_err(|err| with_probe_context(err, remote, candidate))?;
        if exists {
            log::debug!("Remote {} has branch {}", remote, candidate);
            return Ok(candidate.clone());
        }
        log::debug!("Remote {} has no branch {}", remote, candidate);
    }

    Ok(candidates.first().to_string())
}

/// Fetch the target and decide how to check it out.
pub fn materialize<B: RefBackend + ?Sized>(
    target: &CheckoutTarget,
    backend: &B,
) -> Result<ResolvedCheckout, ResolveError> {
    let CheckoutTarget { remote, branch } = target;

    backend
        .fetch_ref(remote, branch)
        .map_err(|err| with_fetch_context(err, remote, branch))?;

    let mode = if backend.local_branch_exists(branch)? {
        CheckoutMode::SwitchExistingLocal
    } else if backend.remote_tracking_exists(remote, branch)? {
        CheckoutMode::CreateFromRemote
    } else {
        return Err(ResolveError::BranchNotFound {
            remote_ref: format!("{}/{}", remote, branch),
        });
    };

    Ok(ResolvedCheckout {
        remote: remote.clone(),
        branch: branch.clone(),
        mode,
    })
}

/// Resolve a raw spec all the way to a checkout decision without touching
/// the working tree.
pub fn resolve_checkout<B: RefBackend + ?Sized>(
    input: &str,
    options: &ResolveOptions,
    backend: &B,
) -> Result<ResolvedCheckout, ResolveError> {
    let spec = RefSpec::parse(input)?;
    let remotes = backend.list_remotes()?;
    let target = plan_checkout(&spec, &remotes, options, backend)?;
    materialize(&target, backend)
}

/// Switch the working tree according to a resolved decision.
pub fn apply_checkout<B: RefBackend + ?Sized>(
    resolved: &ResolvedCheckout,
    backend: &B,
) -> Result<(), ResolveError> {
    match resolved.mode {
        CheckoutMode::SwitchExistingLocal => backend.checkout(&resolved.branch),
        CheckoutMode::CreateFromRemote => {
            backend.checkout_new_tracking(&resolved.branch, &resolved.remote_ref())
        }
    }
}

/// Resolve `input` and check it out.
pub fn checkout<B: RefBackend + ?Sized>(
    input: &str,
    options: &ResolveOptions,
    backend: &B,
) -> Result<ResolvedCheckout, ResolveError> {
    let resolved = resolve_checkout(input, options, backend)?;
    apply_checkout(&resolved, backend)?;
    Ok(resolved)
}

fn with_probe_context(err: ResolveError, remote: &str, branch: &str) -> ResolveError {
    match err {
        ResolveError::ProbeFailed { .. } => err,
        other => ResolveError::ProbeFailed {
            remote: remote.to_string(),
            branch: branch.to_string(),
            message: other.to_string(),
        },
    }
}

fn with_fetch_context(err: ResolveError, remote: &str, branch: &str) -> ResolveError {
    match err {
        ResolveError::FetchFailed { .. } => err,
        other => ResolveError::FetchFailed {
            remote: remote.to_string(),
            branch: branch.to_string(),
            message: other.to_string(),
        },
    }
}
