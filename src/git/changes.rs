//! File change extraction between a target revision and HEAD.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GitError;

use super::executor::{GitExecutor, SystemGit, git_args};
use super::truncate::truncate_diff;

/// Characters held back from the caller's budget for report metadata.
pub const METADATA_RESERVE: usize = 2000;

/// Kind of change git reports for a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    TypeChanged,
    #[default]
    Unknown,
}

impl ChangeKind {
    /// Map a `--name-status` token to a change kind.
    ///
    /// Only the first letter counts, so similarity scores such as `R100`
    /// degrade to their letter. Anything unrecognized is `Unknown`.
    pub fn from_status(status: &str) -> Self {
        match status.chars().next() {
            Some('A') => Self::Added,
            Some('M') => Self::Modified,
            Some('D') => Self::Deleted,
            Some('R') => Self::Renamed,
            Some('C') => Self::Copied,
            Some('T') => Self::TypeChanged,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::TypeChanged => "type_changed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single changed file from `git diff --name-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Raw status token, e.g. `M` or `R087`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub change_type: ChangeKind,
}

impl FileChange {
    /// Parse one tab-separated name-status line.
    ///
    /// For renames and copies git prints `R087\told\tnew`; the first path is kept.
    pub fn from_name_status_line(line: &str) -> Option<Self> {
        if line.trim().is_empty() {
            return None;
        }

        let mut parts = line.split('\t');
        let status = parts.next()?;
        let filename = parts.next()?;

        Some(Self {
            status: status.to_string(),
            filename: filename.to_string(),
            change_type: ChangeKind::from_status(status),
        })
    }
}

/// Parse the full `--name-status` output.
pub fn parse_name_status(output: &str) -> Vec<FileChange> {
    output
        .lines()
        .filter_map(FileChange::from_name_status_line)
        .collect()
}

/// High-level counts derived from the changed file list.
///
/// Only added, modified, deleted and renamed files are tallied; copies and
/// type changes are counted in `total_files_changed` alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub renamed: usize,
    /// Extension (text after the last dot) to number of files.
    pub file_types: BTreeMap<String, usize>,
    /// Distinct parent directories, sorted. The repository root is omitted.
    pub directories: Vec<String>,
}

/// Build a [`ChangeSummary`] in a single pass over the file list.
pub fn summarize_changes(changes: &[FileChange]) -> ChangeSummary {
    let mut summary = ChangeSummary::default();
    let mut directories = BTreeSet::new();

    for change in changes {
        match change.change_type {
            ChangeKind::Added => summary.added += 1,
            ChangeKind::Modified => summary.modified += 1,
            ChangeKind::Deleted => summary.deleted += 1,
            ChangeKind::Renamed => summary.renamed += 1,
            _ => {}
        }

        if let Some((_, ext)) = change.filename.rsplit_once('.') {
            *summary.file_types.entry(ext.to_string()).or_insert(0) += 1;
        }

        if let Some((dir, _)) = change.filename.rsplit_once('/')
            && !dir.is_empty()
        {
            directories.insert(dir.to_string());
        }
    }

    summary.directories = directories.into_iter().collect();
    summary
}

/// Structured view of the changes between a target revision and HEAD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangeReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub branch_comparison: String,
    pub total_files_changed: usize,
    pub file_changes: Vec<FileChange>,
    pub diff_stats: String,
    pub diff_content: String,
    pub truncated: bool,
    pub original_diff_size: usize,
    pub change_summary: ChangeSummary,
}

impl ChangeReport {
    /// Report for a failed extraction: error set, every count and list empty.
    pub fn failed(branch_comparison: impl Into<String>, error: &GitError) -> Self {
        Self {
            error: Some(error.to_string()),
            branch_comparison: branch_comparison.into(),
            ..Self::default()
        }
    }
}

/// Revision range from the target to the current HEAD.
pub fn comparison_range(target: &str) -> String {
    format!("{}...HEAD", target)
}

/// Extracts change data from a repository through a [`GitExecutor`].
#[derive(Debug, Clone)]
pub struct ChangeExtractor<E = SystemGit> {
    pub(super) executor: E,
}

impl ChangeExtractor<SystemGit> {
    /// Extractor backed by the system git binary.
    pub fn new(repo_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self::with_executor(SystemGit::new(repo_path, timeout))
    }
}

impl<E: GitExecutor> ChangeExtractor<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    /// Analyze file changes between `target` and HEAD.
    ///
    /// `max_tokens` is an approximate character budget; 2000 characters are
    /// reserved for metadata and the rest bounds the diff text. Git failures
    /// come back as a report with `error` set rather than an `Err`.
    pub async fn get_file_changes(&self, target: &str, max_tokens: usize) -> ChangeReport {
        let range = comparison_range(target);
        match self.collect_changes(&range, max_tokens).await {
            Ok(report) => report,
            Err(e) => {
                warn!("Failed to analyze changes for {}: {}", range, e);
                ChangeReport::failed(range, &e)
            }
        }
    }

    async fn collect_changes(
        &self,
        range: &str,
        max_tokens: usize,
    ) -> Result<ChangeReport, GitError> {
        let name_status = self
            .executor
            .run(git_args(&["diff", "--name-status", range]))
            .await?;
        let diff_stats = self.executor.run(git_args(&["diff", "--stat", range])).await?;
        let full_diff = self.executor.run(git_args(&["diff", range])).await?;

        let file_changes = parse_name_status(&name_status);
        let change_summary = summarize_changes(&file_changes);

        let budget = max_tokens.saturating_sub(METADATA_RESERVE);
        let diff = truncate_diff(&full_diff, budget);
        let original_diff_size = full_diff.chars().count();

        debug!(
            "{}: {} files, diff {} chars (budget {}, truncated: {})",
            range,
            file_changes.len(),
            original_diff_size,
            budget,
            diff.truncated
        );

        Ok(ChangeReport {
            error: None,
            branch_comparison: range.to_string(),
            total_files_changed: file_changes.len(),
            file_changes,
            diff_stats,
            diff_content: diff.content,
            truncated: diff.truncated,
            original_diff_size,
            change_summary,
        })
    }
}
