//! Branch reference resolution for `flow gitCheckout`.
//!
//! Turns a branch name, `remote/branch` shorthand, or GitHub tree URL into a
//! concrete remote + branch and checks it out:
//!
//! - [`RefSpec`] classifies raw input and expands tree URLs into candidates
//! - [`select_remote`] picks the remote
//! - [`plan_checkout`] / [`materialize`] decide what to check out
//! - [`GitRefBackend`] performs the git side effects

mod error;
mod git_backend;
mod ref_spec;
mod remote;
mod resolver;

#[cfg(test)]
mod tests;

pub use error::ResolveError;
pub use git_backend::GitRefBackend;
pub use ref_spec::{BranchCandidates, RefSpec, parse_github_tree_url, split_remote_prefix};
pub use remote::{DEFAULT_REMOTE, select_remote};
pub use resolver::{
    CheckoutMode, CheckoutTarget, RefBackend, RemoteProbe, ResolveOptions, ResolvedCheckout,
    apply_checkout, checkout, materialize, pick_candidate, plan_checkout, resolve_checkout,
};
