use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::{LazyLock, Mutex, MutexGuard};
use tempfile::TempDir;

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// A working clone plus a bare repository wired up as its `origin` remote.
pub(crate) struct RemoteFixture {
    _root: TempDir,
    work: PathBuf,
    remote: PathBuf,
}

impl RemoteFixture {
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work
    }

    pub(crate) fn remote_dir(&self) -> &Path {
        &self.remote
    }

    /// Create `branch` on the remote (pointing at the work tree's HEAD)
    /// without creating a local branch or remote-tracking ref.
    pub(crate) fn push_remote_branch(&self, branch: &str) {
        git(
            &self.work,
            &["push", "--quiet", "--no-verify", "origin", &format!("HEAD:refs/heads/{}", branch)],
        );
        // Drop the tracking ref the push created so tests start from "never fetched".
        let _ = Command::new("git")
            .current_dir(&self.work)
            .args(["update-ref", "-d", &format!("refs/remotes/origin/{}", branch)])
            .output();
    }

    /// Register another remote name pointing at the same bare repository.
    pub(crate) fn add_remote_alias(&self, name: &str) {
        let remote = self.remote.to_string_lossy().to_string();
        git(&self.work, &["remote", "add", name, &remote]);
    }
}

pub(crate) fn create_test_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    init_repo(temp_dir.path());
    temp_dir
}

pub(crate) fn create_test_repo_with_remote() -> RemoteFixture {
    let root = TempDir::new().unwrap();
    let remote = root.path().join("remote.git");
    let work = root.path().join("work");
    std::fs::create_dir_all(&remote).unwrap();
    std::fs::create_dir_all(&work).unwrap();

    git(&remote, &["init", "--bare", "--quiet"]);
    git(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    init_repo(&work);
    let remote_str = remote.to_string_lossy().to_string();
    git(&work, &["remote", "add", "origin", &remote_str]);
    git(&work, &["push", "--quiet", "origin", "main"]);

    RemoteFixture {
        _root: root,
        work,
        remote,
    }
}

fn init_repo(path: &Path) {
    git(path, &["init", "--quiet"]);
    // Ensure the repo uses a deterministic default branch name across environments.
    // This sets HEAD to an unborn `main` branch before the first commit.
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);

    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    std::fs::write(path.join("README.md"), "# Test\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "--quiet", "-m", "Initial commit"]);
}

pub(crate) fn git(repo_dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .current_dir(repo_dir)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute git {}: {}", args.join(" "), e));

    if !output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!(
            "git {} failed (exit code {:?})\nstdout:\n{}\nstderr:\n{}",
            args.join(" "),
            output.status.code(),
            stdout,
            stderr
        );
    }
}
