//! `get_git_status` tool.

use serde::Serialize;

use crate::git::BranchInfo;

use super::ToolContext;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitStatus {
    pub status: &'static str,
    #[serde(flatten)]
    pub branch: BranchInfo,
}

/// Branch info for the context repository. Git failures show up as
/// `is_git_repo = false` with an `error`, never as a failed call.
pub async fn get_git_status(ctx: &ToolContext) -> GitStatus {
    GitStatus {
        status: "success",
        branch: ctx.extractor(super::analyze::CONTEXT_REPO).get_branch_info().await,
    }
}
