//! `analyze_file_changes` tool.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::git::ChangeAnalysis;

use super::ToolContext;

pub const DEFAULT_TARGET_BRANCH: &str = "main";
pub const DEFAULT_MAX_TOKENS: usize = 25_000;

/// Repository path meaning "use the context's repository".
pub const CONTEXT_REPO: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalyzeParams {
    pub target_branch: String,
    pub repo_path: String,
    pub max_tokens: usize,
}

impl Default for AnalyzeParams {
    fn default() -> Self {
        Self {
            target_branch: DEFAULT_TARGET_BRANCH.to_string(),
            repo_path: CONTEXT_REPO.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Change report for `target_branch...HEAD` plus branch info and recent commits.
pub async fn analyze_file_changes(ctx: &ToolContext, params: &AnalyzeParams) -> ChangeAnalysis {
    ctx.extractor(&params.repo_path)
        .analyze(&params.target_branch, params.max_tokens)
        .await
}

/// Payload returned when the call could not be made at all.
pub fn failure(error: &str, params: &AnalyzeParams) -> Value {
    json!({
        "error": format!("Failed to analyze file changes: {}", error),
        "target_branch": params.target_branch,
        "repo_path": params.repo_path,
        "total_files_changed": 0,
        "file_changes": [],
        "diff_stats": "",
        "diff_content": "",
        "truncated": false,
    })
}
