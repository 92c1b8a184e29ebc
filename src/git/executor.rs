//! Spawning the system `git` binary.
//!
//! All queries shell out to `git` in the configured repository directory,
//! inheriting the user's git config. Every invocation is bounded by a timeout.

use std::env;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::GitError;

/// Default timeout for a single git invocation.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable to override the default timeout.
pub const TIMEOUT_ENV_VAR: &str = "PRSCOUT_GIT_TIMEOUT";

/// Get the configured git timeout.
///
/// Reads `PRSCOUT_GIT_TIMEOUT` (seconds) if set, otherwise 30 seconds.
/// Invalid values are logged and ignored.
pub fn default_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Trait for executing git commands.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run git with the given arguments and return trimmed stdout.
    async fn run(&self, args: Vec<String>) -> Result<String, GitError>;
}

/// Executor that calls the real git binary inside a repository directory.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_path: PathBuf,
    timeout: Duration,
}

impl SystemGit {
    pub fn new(repo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            repo_path: repo_path.into(),
            timeout,
        }
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    async fn run(&self, args: Vec<String>) -> Result<String, GitError> {
        let joined = args.join(" ");
        debug!(repo = %self.repo_path.display(), "git {}", joined);

        let output = timeout(
            self.timeout,
            Command::new("git")
                .args(&args)
                .current_dir(&self.repo_path)
                .stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| GitError::Timeout {
            args: joined.clone(),
            seconds: self.timeout.as_secs(),
        })?
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound && which::which("git").is_err() {
                GitError::NotInstalled
            } else {
                GitError::SpawnFailed(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(GitError::NonZeroExit {
                args: joined,
                code: output.status.code().unwrap_or(-1),
                stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Build an owned argument vector from string slices.
pub(crate) fn git_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
