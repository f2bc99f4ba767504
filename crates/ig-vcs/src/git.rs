//! Git adapter: `git rev-parse HEAD` with a hard timeout

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::adapter::{RevisionAdapter, VcsError};
use crate::DEFAULT_TIMEOUT;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Reads the current commit of a Git working tree.
pub struct GitRevision {
    /// Working directory for git operations
    work_dir: PathBuf,
    timeout: Duration,
}

impl GitRevision {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run a git command in the working directory, killing it at the deadline.
    fn git_cmd(&self, args: &[&str]) -> Result<String, VcsError> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.work_dir);
        let output = run_with_timeout(cmd, self.timeout)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VcsError::CommandFailed(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl RevisionAdapter for GitRevision {
    fn query(&self) -> Result<String, VcsError> {
        let rev = self.git_cmd(&["rev-parse", "HEAD"])?;
        if rev.is_empty() {
            return Err(VcsError::EmptyOutput);
        }
        Ok(rev)
    }

    fn name(&self) -> &str {
        "git"
    }
}

fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<Output, VcsError> {
    let program = cmd.get_program().to_string_lossy().to_string();
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| VcsError::Spawn {
            program: program.clone(),
            source,
        })?;

    let deadline = Instant::now() + timeout;
    loop {
        let status = child.try_wait().map_err(|source| VcsError::Spawn {
            program: program.clone(),
            source,
        })?;
        match status {
            Some(_) => {
                return child
                    .wait_with_output()
                    .map_err(|source| VcsError::Spawn { program, source })
            }
            None if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(VcsError::Timeout { program, timeout });
            }
            None => thread::sleep(POLL_INTERVAL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::UNKNOWN_REVISION;
    use std::path::Path;
    use tempfile::tempdir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    fn init_git_repo(dir: &Path) -> bool {
        let run = |args: &[&str]| {
            Command::new("git")
                .args(args)
                .current_dir(dir)
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        };
        std::fs::write(dir.join("README.md"), "# Test\n").unwrap();
        run(&["init"])
            && run(&["config", "user.name", "Test User"])
            && run(&["config", "user.email", "test@example.com"])
            && run(&["add", "."])
            && run(&["-c", "commit.gpgsign=false", "commit", "-m", "Initial commit"])
    }

    #[test]
    fn non_repository_yields_sentinel() {
        let dir = tempdir().unwrap();
        let rev = crate::current_revision(dir.path(), Duration::from_millis(500));
        assert_eq!(rev, UNKNOWN_REVISION);
    }

    #[test]
    fn missing_directory_yields_sentinel() {
        let adapter = GitRevision::new("/definitely/not/a/real/dir");
        assert_eq!(adapter.current_revision().as_str(), UNKNOWN_REVISION);
    }

    #[test]
    fn repository_head_is_reported() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        if !init_git_repo(dir.path()) {
            return;
        }
        let rev = GitRevision::new(dir.path()).current_revision();
        assert!(rev.is_known());
        assert!(rev.as_str().len() >= 40);
        assert_eq!(crate::detect(dir.path(), DEFAULT_TIMEOUT).name(), "git");
    }

    #[test]
    fn slow_command_is_killed_at_deadline() {
        let sleep_available = Command::new("sleep")
            .arg("0")
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if !sleep_available {
            return;
        }

        let mut cmd = Command::new("sleep");
        cmd.arg("5");
        let started = Instant::now();
        let result = run_with_timeout(cmd, Duration::from_millis(100));
        let elapsed = started.elapsed();

        match result {
            Err(VcsError::Timeout { program, timeout }) => {
                assert_eq!(program, "sleep");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
        assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);
    }

    #[test]
    fn fast_command_completes_within_deadline() {
        if !git_available() {
            return;
        }
        let mut cmd = Command::new("git");
        cmd.arg("--version");
        let output = run_with_timeout(cmd, DEFAULT_TIMEOUT).unwrap();
        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("git"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_root_is_resolved_before_detection() {
        if !git_available() {
            return;
        }
        let repo = tempdir().unwrap();
        if !init_git_repo(repo.path()) {
            return;
        }
        let sub = repo.path().join("sub");
        std::fs::create_dir_all(&sub).unwrap();

        // The link's own ancestors contain no `.git`; its target's do.
        let outside = tempdir().unwrap();
        let link = outside.path().join("workspace");
        std::os::unix::fs::symlink(&sub, &link).unwrap();

        let adapter = crate::detect(&link, DEFAULT_TIMEOUT);
        assert_eq!(adapter.name(), "git");
        assert!(adapter.current_revision().is_known());
    }

    #[test]
    fn unresolvable_root_falls_back_to_given_path() {
        let adapter = crate::detect(Path::new("/definitely/not/a/real/dir"), DEFAULT_TIMEOUT);
        assert_eq!(adapter.name(), "none");
    }
}
