//! Current branch and remote branch listing.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::GitError;

use super::changes::ChangeExtractor;
use super::executor::{GitExecutor, git_args};

/// Branch information for the configured repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchInfo {
    pub current_branch: Option<String>,
    pub remote_branches: Vec<String>,
    pub is_git_repo: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BranchInfo {
    /// Branch info for a directory git could not read.
    pub fn not_a_repo(error: &GitError) -> Self {
        Self {
            current_branch: None,
            remote_branches: Vec::new(),
            is_git_repo: false,
            error: Some(error.to_string()),
        }
    }
}

/// Parse `git branch -r` output into trimmed branch names.
pub fn parse_remote_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from)
        .collect()
}

impl<E: GitExecutor> ChangeExtractor<E> {
    /// Report the current branch and remote branches.
    ///
    /// Any git failure yields `is_git_repo = false` with empty branch data.
    pub async fn get_branch_info(&self) -> BranchInfo {
        match self.collect_branch_info().await {
            Ok(info) => info,
            Err(e) => {
                warn!("Failed to read branch info: {}", e);
                BranchInfo::not_a_repo(&e)
            }
        }
    }

    async fn collect_branch_info(&self) -> Result<BranchInfo, GitError> {
        let current_branch = self
            .executor
            .run(git_args(&["branch", "--show-current"]))
            .await?;
        let remotes = self.executor.run(git_args(&["branch", "-r"])).await?;

        Ok(BranchInfo {
            current_branch: Some(current_branch),
            remote_branches: parse_remote_branches(&remotes),
            is_git_repo: true,
            error: None,
        })
    }
}
