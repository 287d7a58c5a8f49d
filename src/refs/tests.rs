//! Tests for branch spec resolution.
//!
//! The first half drives the resolver with an in-memory backend that records
//! every collaborator call; the second half runs it against real temporary
//! repositories with a bare `origin`.

use super::*;
use crate::test_support::{RemoteFixture, create_test_repo, create_test_repo_with_remote, git};
use std::cell::RefCell;
use std::collections::HashSet;

#[derive(Default)]
struct MockBackend {
    remotes: Vec<String>,
    remote_branches: HashSet<(String, String)>,
    local_branches: HashSet<String>,
    tracking_refs: HashSet<(String, String)>,
    fetch_error: Option<String>,
    probe_error: Option<String>,
    /// Simulates a fetch that succeeds without the branch showing up.
    fetch_creates_tracking: bool,
    calls: RefCell<Vec<String>>,
    fetched: RefCell<Vec<(String, String)>>,
}

impl MockBackend {
    fn with_remotes(names: &[&str]) -> Self {
        Self {
            remotes: names.iter().map(|s| s.to_string()).collect(),
            fetch_creates_tracking: true,
            ..Default::default()
        }
    }

    fn remote_branch(mut self, remote: &str, branch: &str) -> Self {
        self.remote_branches
            .insert((remote.to_string(), branch.to_string()));
        self
    }

    fn local_branch(mut self, branch: &str) -> Self {
        self.local_branches.insert(branch.to_string());
        self
    }

    fn tracking_ref(mut self, remote: &str, branch: &str) -> Self {
        self.tracking_refs
            .insert((remote.to_string(), branch.to_string()));
        self
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn probes(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.starts_with("probe "))
            .collect()
    }
}

impl RemoteProbe for MockBackend {
    fn remote_has_branch(&self, remote: &str, branch: &str) -> Result<bool, ResolveError> {
        self.record(format!("probe {} {}", remote, branch));
        if let Some(message) = &self.probe_error {
            return Err(ResolveError::Git(message.clone()));
        }
        Ok(self
            .remote_branches
            .contains(&(remote.to_string(), branch.to_string())))
    }
}

impl RefBackend for MockBackend {
    fn list_remotes(&self) -> Result<Vec<String>, ResolveError> {
        self.record("list_remotes".to_string());
        Ok(self.remotes.clone())
    }

    fn fetch_ref(&self, remote: &str, branch: &str) -> Result<(), ResolveError> {
        self.record(format!("fetch {} {}", remote, branch));
        if let Some(message) = &self.fetch_error {
            return Err(ResolveError::Git(message.clone()));
        }
        self.fetched
            .borrow_mut()
            .push((remote.to_string(), branch.to_string()));
        Ok(())
    }

    fn local_branch_exists(&self, branch: &str) -> Result<bool, ResolveError> {
        self.record(format!("local {}", branch));
        Ok(self.local_branches.contains(branch))
    }

    fn remote_tracking_exists(&self, remote: &str, branch: &str) -> Result<bool, ResolveError> {
        self.record(format!("tracking {}/{}", remote, branch));
        let key = (remote.to_string(), branch.to_string());
        let fetched_now = self.fetch_creates_tracking
            && self.remote_branches.contains(&key)
            && self.fetched.borrow().contains(&key);
        Ok(self.tracking_refs.contains(&key) || fetched_now)
    }

    fn checkout(&self, branch: &str) -> Result<(), ResolveError> {
        self.record(format!("checkout {}", branch));
        Ok(())
    }

    fn checkout_new_tracking(&self, branch: &str, remote_ref: &str) -> Result<(), ResolveError> {
        self.record(format!("checkout -b {} {}", branch, remote_ref));
        Ok(())
    }
}

fn defaults() -> ResolveOptions {
    ResolveOptions::default()
}

fn plan(input: &str, backend: &MockBackend) -> Result<CheckoutTarget, ResolveError> {
    let spec = RefSpec::parse(input)?;
    plan_checkout(&spec, &backend.remotes, &defaults(), backend)
}

// ============================================================================
// Planning
// ============================================================================

#[test]
fn plain_branch_uses_trimmed_input_unpinned() {
    let backend = MockBackend::with_remotes(&["fork", "origin"]);
    let target = plan("  topic-42 \n", &backend).unwrap();
    assert_eq!(
        target,
        CheckoutTarget {
            remote: "origin".to_string(),
            branch: "topic-42".to_string(),
        }
    );
    // Direct specs are never probed.
    assert!(backend.probes().is_empty());
}

#[test]
fn remote_prefix_pins_configured_remote() {
    let backend = MockBackend::with_remotes(&["origin", "upstream"]);
    let target = plan("upstream/foo", &backend).unwrap();
    assert_eq!(target.remote, "upstream");
    assert_eq!(target.branch, "foo");

    let target = plan("origin/foo", &backend).unwrap();
    assert_eq!(target.remote, "origin");
    assert_eq!(target.branch, "foo");
}

#[test]
fn unknown_prefix_is_part_of_the_branch_name() {
    let backend = MockBackend::with_remotes(&["origin"]);
    let target = plan("nonexistent/foo", &backend).unwrap();
    assert_eq!(target.remote, "origin");
    assert_eq!(target.branch, "nonexistent/foo");
}

#[test]
fn explicit_remote_must_exist() {
    let backend = MockBackend::with_remotes(&["origin"]);
    let spec = RefSpec::parse("foo").unwrap();
    let options = ResolveOptions {
        remote: Some("nonexistent".to_string()),
        ..defaults()
    };

    let err = plan_checkout(&spec, &backend.remotes, &options, &backend).unwrap_err();
    assert_eq!(
        err,
        ResolveError::RemoteNotFound {
            remote: "nonexistent".to_string()
        }
    );
}

#[test]
fn explicit_remote_disables_prefix_splitting() {
    let backend = MockBackend::with_remotes(&["origin", "upstream"]);
    let spec = RefSpec::parse("origin/foo").unwrap();
    let options = ResolveOptions {
        remote: Some("upstream".to_string()),
        ..defaults()
    };

    let target = plan_checkout(&spec, &backend.remotes, &options, &backend).unwrap();
    assert_eq!(target.remote, "upstream");
    assert_eq!(target.branch, "origin/foo");
}

#[test]
fn no_remotes_configured_fails() {
    let backend = MockBackend::with_remotes(&[]);
    assert_eq!(plan("main", &backend), Err(ResolveError::NoRemotesConfigured));
}

#[test]
fn tree_url_picks_first_candidate_that_exists_remotely() {
    let backend =
        MockBackend::with_remotes(&["origin"]).remote_branch("origin", "feature/login-fix");

    let target = plan(
        "https://github.com/acme/widgets/tree/feature/login-fix",
        &backend,
    )
    .unwrap();

    assert_eq!(target.branch, "feature/login-fix");
    assert_eq!(
        backend.probes(),
        vec!["probe origin feature", "probe origin feature/login-fix"]
    );
}

#[test]
fn tree_url_stops_probing_at_first_hit() {
    let backend = MockBackend::with_remotes(&["origin"])
        .remote_branch("origin", "feature")
        .remote_branch("origin", "feature/login-fix");

    let target = plan(
        "https://github.com/acme/widgets/tree/feature/login-fix",
        &backend,
    )
    .unwrap();

    assert_eq!(target.branch, "feature");
    assert_eq!(backend.probes(), vec!["probe origin feature"]);
}

#[test]
fn tree_url_falls_back_to_first_candidate() {
    let backend = MockBackend::with_remotes(&["origin"]);
    let target = plan(
        "https://github.com/acme/widgets/tree/new/branch/path",
        &backend,
    )
    .unwrap();

    assert_eq!(target.branch, "new");
    assert_eq!(backend.probes().len(), 3);
}

#[test]
fn tree_url_probes_ref_override_first() {
    let backend = MockBackend::with_remotes(&["origin"])
        .remote_branch("origin", "main")
        .remote_branch("origin", "release/9.0");

    let target = plan(
        "https://github.com/acme/widgets/tree/main?ref=release/9.0",
        &backend,
    )
    .unwrap();

    assert_eq!(target.branch, "release/9.0");
    assert_eq!(backend.probes(), vec!["probe origin release/9.0"]);
}

#[test]
fn tree_url_probes_against_chosen_remote() {
    let backend = MockBackend::with_remotes(&["upstream", "origin"])
        .remote_branch("upstream", "feature/x");

    let target = plan("https://github.com/acme/widgets/tree/feature/x", &backend).unwrap();

    // origin is preferred, so upstream's branch is never seen.
    assert_eq!(target.remote, "origin");
    assert_eq!(target.branch, "feature");
}

#[test]
fn probe_failure_carries_remote_and_branch() {
    let backend = MockBackend {
        probe_error: Some("Could not resolve host: github.com".to_string()),
        ..MockBackend::with_remotes(&["origin"])
    };

    let err = plan("https://github.com/acme/widgets/tree/feature/x", &backend).unwrap_err();
    assert_eq!(
        err,
        ResolveError::ProbeFailed {
            remote: "origin".to_string(),
            branch: "feature".to_string(),
            message: "Could not resolve host: github.com".to_string(),
        }
    );
    // No retry, no further candidates.
    assert_eq!(backend.probes().len(), 1);
}

// ============================================================================
// Full resolution
// ============================================================================

#[test]
fn empty_input_fails_before_any_collaborator_call() {
    let backend = MockBackend::with_remotes(&["origin"]);
    for input in ["", "   ", "\n\t"] {
        let err = resolve_checkout(input, &defaults(), &backend).unwrap_err();
        assert_eq!(err, ResolveError::EmptyBranchName);
    }
    assert!(backend.calls().is_empty());
}

#[test]
fn option_like_branch_name_is_rejected_before_git_is_asked() {
    let backend = MockBackend::with_remotes(&["origin"]);

    for input in ["--upload-pack=touch x", "origin/-b", "-"] {
        let err = resolve_checkout(input, &defaults(), &backend).unwrap_err();
        assert!(
            matches!(err, ResolveError::InvalidBranchName { .. }),
            "unexpected error for {input}: {err:?}"
        );
        assert!(err.is_input_error());
    }

    assert!(backend.calls().iter().all(|call| call == "list_remotes"));
}

#[test]
fn option_like_tree_url_candidates_never_reach_the_backend() {
    let backend = MockBackend::with_remotes(&["origin"]).remote_branch("origin", "main");

    let err = resolve_checkout(
        "https://github.com/acme/widgets/tree/--upload-pack=x/y",
        &defaults(),
        &backend,
    )
    .unwrap_err();
    assert_eq!(err, ResolveError::NoBranchCandidates);
    assert!(backend.calls().is_empty());

    let resolved = resolve_checkout(
        "https://github.com/acme/widgets/tree/main?ref=--upload-pack%3Dx",
        &defaults(),
        &backend,
    )
    .unwrap();
    assert_eq!(resolved.branch, "main");
    assert!(backend.calls().iter().all(|call| !call.contains("--upload-pack")));
}

#[test]
fn malformed_url_fails_before_any_collaborator_call() {
    let backend = MockBackend::with_remotes(&["origin"]);

    let err = resolve_checkout("https://github.com/acme", &defaults(), &backend).unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedPath { .. }));

    let err = resolve_checkout(
        "https://bitbucket.org/acme/widgets/tree/main",
        &defaults(),
        &backend,
    )
    .unwrap_err();
    assert!(matches!(err, ResolveError::UnsupportedHost { .. }));

    assert!(backend.calls().is_empty());
}

#[test]
fn existing_local_branch_is_switched_to() {
    let backend = MockBackend::with_remotes(&["origin"])
        .remote_branch("origin", "feature/login-fix")
        .local_branch("feature/login-fix")
        .tracking_ref("origin", "feature/login-fix");

    let resolved = resolve_checkout(
        "https://github.com/acme/widgets/tree/feature/login-fix",
        &defaults(),
        &backend,
    )
    .unwrap();

    assert_eq!(resolved.mode, CheckoutMode::SwitchExistingLocal);
    assert_eq!(resolved.branch, "feature/login-fix");
    // The tracking ref is never consulted once the local branch is found.
    assert!(
        !backend
            .calls()
            .iter()
            .any(|call| call.starts_with("tracking "))
    );
}

#[test]
fn missing_local_branch_creates_tracking_branch() {
    let backend = MockBackend::with_remotes(&["origin"]).remote_branch("origin", "topic");

    let resolved = checkout("topic", &defaults(), &backend).unwrap();

    assert_eq!(resolved.mode, CheckoutMode::CreateFromRemote);
    assert_eq!(resolved.remote_ref(), "origin/topic");
    assert_eq!(
        backend.calls(),
        vec![
            "list_remotes",
            "fetch origin topic",
            "local topic",
            "tracking origin/topic",
            "checkout -b topic origin/topic",
        ]
    );
}

#[test]
fn switch_mode_checks_out_local_name() {
    let backend = MockBackend::with_remotes(&["origin"])
        .remote_branch("origin", "main")
        .local_branch("main");

    checkout("origin/main", &defaults(), &backend).unwrap();
    assert_eq!(backend.calls().last().unwrap(), "checkout main");
}

#[test]
fn fetch_failure_is_wrapped_and_not_retried() {
    let backend = MockBackend {
        fetch_error: Some("fatal: couldn't find remote ref nope".to_string()),
        ..MockBackend::with_remotes(&["origin"])
    };

    let err = resolve_checkout("nope", &defaults(), &backend).unwrap_err();
    assert_eq!(
        err,
        ResolveError::FetchFailed {
            remote: "origin".to_string(),
            branch: "nope".to_string(),
            message: "fatal: couldn't find remote ref nope".to_string(),
        }
    );
    let fetches = backend
        .calls()
        .into_iter()
        .filter(|call| call.starts_with("fetch "))
        .count();
    assert_eq!(fetches, 1);
}

#[test]
fn fetch_without_resulting_ref_is_branch_not_found() {
    let backend = MockBackend {
        fetch_creates_tracking: false,
        ..MockBackend::with_remotes(&["origin"]).remote_branch("origin", "racy")
    };

    let err = checkout("racy", &defaults(), &backend).unwrap_err();
    assert_eq!(
        err,
        ResolveError::BranchNotFound {
            remote_ref: "origin/racy".to_string()
        }
    );
    assert!(
        !backend
            .calls()
            .iter()
            .any(|call| call.starts_with("checkout"))
    );
}

// ============================================================================
// Against real repositories
// ============================================================================

fn git_stdout(dir: &std::path::Path, args: &[&str]) -> String {
    crate::git::run_git(dir, args).unwrap().stdout
}

fn fixture_with_branches(branches: &[&str]) -> RemoteFixture {
    let fixture = create_test_repo_with_remote();
    for branch in branches {
        fixture.push_remote_branch(branch);
    }
    fixture
}

#[test]
fn git_backend_creates_tracking_branch_from_remote() {
    let fixture = fixture_with_branches(&["feature/login-fix"]);
    let backend = GitRefBackend::new(fixture.work_dir());

    let resolved = checkout("feature/login-fix", &defaults(), &backend).unwrap();

    assert_eq!(resolved.mode, CheckoutMode::CreateFromRemote);
    let dir = fixture.work_dir();
    assert_eq!(
        git_stdout(dir, &["rev-parse", "--abbrev-ref", "HEAD"]),
        "feature/login-fix"
    );
    assert_eq!(
        git_stdout(dir, &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "origin/feature/login-fix"
    );
}

#[test]
fn git_backend_resolves_tree_url_with_slashed_branch() {
    let fixture = fixture_with_branches(&["feature/login-fix"]);
    let backend = GitRefBackend::new(fixture.work_dir());

    let resolved = checkout(
        "https://github.com/acme/widgets/tree/feature/login-fix/src/lib.rs",
        &defaults(),
        &backend,
    )
    .unwrap();

    assert_eq!(resolved.branch, "feature/login-fix");
    assert_eq!(
        git_stdout(fixture.work_dir(), &["rev-parse", "--abbrev-ref", "HEAD"]),
        "feature/login-fix"
    );
}

#[test]
fn git_backend_switches_to_existing_local_branch() {
    let fixture = fixture_with_branches(&["topic"]);
    let dir = fixture.work_dir();
    git(dir, &["branch", "topic"]);

    let backend = GitRefBackend::new(dir);
    let resolved = checkout("origin/topic", &defaults(), &backend).unwrap();

    assert_eq!(resolved.mode, CheckoutMode::SwitchExistingLocal);
    assert_eq!(git_stdout(dir, &["rev-parse", "--abbrev-ref", "HEAD"]), "topic");
    // The pre-existing branch was reused, so it has no upstream configured.
    assert!(crate::git::run_git(dir, &["rev-parse", "--abbrev-ref", "topic@{upstream}"]).is_err());
}

#[test]
fn git_backend_pins_secondary_remote() {
    let fixture = fixture_with_branches(&["topic"]);
    fixture.add_remote_alias("mirror");
    let backend = GitRefBackend::new(fixture.work_dir());

    let resolved = checkout("mirror/topic", &defaults(), &backend).unwrap();

    assert_eq!(resolved.remote, "mirror");
    assert_eq!(
        git_stdout(fixture.work_dir(), &["rev-parse", "--abbrev-ref", "@{upstream}"]),
        "mirror/topic"
    );
}

#[test]
fn git_backend_missing_branch_is_fetch_failure() {
    let fixture = create_test_repo_with_remote();
    let backend = GitRefBackend::new(fixture.work_dir());

    let err = checkout("does-not-exist", &defaults(), &backend).unwrap_err();
    match err {
        ResolveError::FetchFailed { remote, branch, .. } => {
            assert_eq!(remote, "origin");
            assert_eq!(branch, "does-not-exist");
        }
        other => panic!("expected FetchFailed, got {other:?}"),
    }
    assert_eq!(
        git_stdout(fixture.work_dir(), &["rev-parse", "--abbrev-ref", "HEAD"]),
        "main"
    );
}

#[test]
fn git_backend_without_remotes() {
    let temp_dir = create_test_repo();
    let backend = GitRefBackend::new(temp_dir.path());

    let err = checkout("main", &defaults(), &backend).unwrap_err();
    assert_eq!(err, ResolveError::NoRemotesConfigured);
}

#[test]
fn git_backend_probe_reports_unreachable_remote() {
    let fixture = create_test_repo_with_remote();
    let missing = fixture.remote_dir().with_file_name("gone.git");
    let missing = missing.to_string_lossy().to_string();
    git(fixture.work_dir(), &["remote", "set-url", "origin", &missing]);
    let backend = GitRefBackend::new(fixture.work_dir());

    let err = checkout(
        "https://github.com/acme/widgets/tree/feature/x",
        &defaults(),
        &backend,
    )
    .unwrap_err();

    assert!(
        matches!(&err, ResolveError::ProbeFailed { remote, branch, .. } if remote == "origin" && branch == "feature"),
        "unexpected error: {err:?}"
    );
}

#[test]
fn git_backend_never_passes_url_segments_as_git_options() {
    let fixture = fixture_with_branches(&["topic"]);
    let scratch = tempfile::TempDir::new().unwrap();
    let marker = scratch.path().join("marker");
    let injected = format!("--upload-pack=touch {}; git-upload-pack", marker.display());
    let encoded = urlencoding::encode(&injected);
    let backend = GitRefBackend::new(fixture.work_dir());

    let err = checkout(
        &format!("https://github.com/acme/widgets/tree/{}", encoded),
        &defaults(),
        &backend,
    )
    .unwrap_err();
    assert_eq!(err, ResolveError::NoBranchCandidates);

    let resolved = checkout(
        &format!("https://github.com/acme/widgets/tree/topic?ref={}", encoded),
        &defaults(),
        &backend,
    )
    .unwrap();
    assert_eq!(resolved.branch, "topic");

    let err = checkout(&injected, &defaults(), &backend).unwrap_err();
    assert!(matches!(err, ResolveError::InvalidBranchName { .. }));

    assert!(!marker.exists(), "git ran a command taken from the spec");
}
