//! Recent commit log for the compared range.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::changes::{ChangeExtractor, comparison_range};
use super::executor::GitExecutor;

/// Pipe-delimited log format: hash, subject, author, short date.
const LOG_PRETTY_FORMAT: &str = "--pretty=format:%H|%s|%an|%ad";

/// One commit from the bounded log window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub message: String,
    pub author: String,
    pub date: String,
}

/// A log entry: either a commit or the marker left when git failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommitEntry {
    Commit(CommitRecord),
    Error { error: String },
}

impl CommitEntry {
    pub fn message(&self) -> Option<&str> {
        match self {
            CommitEntry::Commit(record) => Some(&record.message),
            CommitEntry::Error { .. } => None,
        }
    }
}

/// Parse `hash|subject|author|date` lines.
///
/// Lines with fewer than four fields are dropped. A subject containing `|`
/// is cut at the first pipe.
pub fn parse_commit_log(output: &str) -> Vec<CommitRecord> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let parts: Vec<&str> = line.split('|').collect();
            if parts.len() < 4 {
                return None;
            }
            Some(CommitRecord {
                hash: parts[0].to_string(),
                message: parts[1].to_string(),
                author: parts[2].to_string(),
                date: parts[3].to_string(),
            })
        })
        .collect()
}

impl<E: GitExecutor> ChangeExtractor<E> {
    /// Fetch up to `limit` commits in `target...HEAD`, newest first.
    ///
    /// On git failure a single [`CommitEntry::Error`] is returned.
    pub async fn get_commit_messages(&self, target: &str, limit: usize) -> Vec<CommitEntry> {
        let range = comparison_range(target);
        let limit_arg = format!("-{}", limit);
        let args = vec![
            "log".to_string(),
            range.clone(),
            LOG_PRETTY_FORMAT.to_string(),
            "--date=short".to_string(),
            limit_arg,
        ];

        match self.executor.run(args).await {
            Ok(output) => parse_commit_log(&output)
                .into_iter()
                .map(CommitEntry::Commit)
                .collect(),
            Err(e) => {
                warn!("Failed to read commit log for {}: {}", range, e);
                vec![CommitEntry::Error {
                    error: e.to_string(),
                }]
            }
        }
    }
}
