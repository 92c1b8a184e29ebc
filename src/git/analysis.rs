//! Full change analysis: report plus branch and commit context.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::branch::BranchInfo;
use super::changes::{ChangeExtractor, ChangeReport};
use super::executor::GitExecutor;
use super::log::CommitEntry;

/// Number of recent commits attached to an analysis.
pub const RECENT_COMMIT_LIMIT: usize = 5;

/// Change report enriched with branch info and recent commits.
///
/// This is the payload of `analyze_file_changes` and the input the
/// suggestion engine works on. Missing fields default when a caller hands
/// back a previously computed analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeAnalysis {
    #[serde(flatten)]
    pub report: ChangeReport,
    #[serde(default)]
    pub branch_info: Option<BranchInfo>,
    #[serde(default)]
    pub recent_commits: Vec<CommitEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

impl ChangeAnalysis {
    /// Analysis carrying only a change report.
    pub fn from_report(report: ChangeReport) -> Self {
        Self {
            report,
            ..Self::default()
        }
    }

    /// Commit subjects, skipping error markers.
    pub fn commit_messages(&self) -> impl Iterator<Item = &str> {
        self.recent_commits.iter().filter_map(CommitEntry::message)
    }
}

impl<E: GitExecutor> ChangeExtractor<E> {
    /// Run the change report, branch info and commit log queries together.
    pub async fn analyze(&self, target: &str, max_tokens: usize) -> ChangeAnalysis {
        let report = self.get_file_changes(target, max_tokens).await;
        let branch_info = self.get_branch_info().await;
        let recent_commits = self.get_commit_messages(target, RECENT_COMMIT_LIMIT).await;

        ChangeAnalysis {
            report,
            branch_info: Some(branch_info),
            recent_commits,
            analysis_timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
            tool_version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::log::CommitRecord;

    #[test]
    fn test_analysis_flattens_report_fields() {
        let mut analysis = ChangeAnalysis::default();
        analysis.report.branch_comparison = "main...HEAD".into();
        analysis.report.total_files_changed = 2;

        let value = serde_json::to_value(&analysis).unwrap();
        assert_eq!(value["branch_comparison"], "main...HEAD");
        assert_eq!(value["total_files_changed"], 2);
        assert!(value.get("report").is_none());
    }

    #[test]
    fn test_analysis_round_trips_through_json() {
        let mut analysis = ChangeAnalysis::default();
        analysis.report.diff_content = "+x".into();
        analysis.recent_commits = vec![
            CommitEntry::Commit(CommitRecord {
                hash: "a".into(),
                message: "fix: crash".into(),
                author: "Ada".into(),
                date: "2025-01-01".into(),
            }),
            CommitEntry::Error {
                error: "boom".into(),
            },
        ];

        let json = serde_json::to_string(&analysis).unwrap();
        let back: ChangeAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
        assert_eq!(back.commit_messages().collect::<Vec<_>>(), vec!["fix: crash"]);
    }

    #[test]
    fn test_partial_analysis_deserializes() {
        let back: ChangeAnalysis =
            serde_json::from_str(r#"{"total_files_changed": 1, "file_changes": [{"filename": "a.md", "status": "A"}]}"#)
                .unwrap();
        assert_eq!(back.report.total_files_changed, 1);
        assert!(back.branch_info.is_none());
        assert!(back.recent_commits.is_empty());
    }
}
