//! Git change extraction by shelling out to the system `git` binary.

pub mod analysis;
pub mod branch;
pub mod changes;
pub mod executor;
pub mod log;
pub mod truncate;

pub use analysis::{ChangeAnalysis, RECENT_COMMIT_LIMIT};
pub use branch::BranchInfo;
pub use changes::{
    ChangeExtractor, ChangeKind, ChangeReport, ChangeSummary, FileChange, METADATA_RESERVE,
    parse_name_status, summarize_changes,
};
pub use executor::{GitExecutor, SystemGit, default_timeout};
pub use log::{CommitEntry, CommitRecord, parse_commit_log};
pub use truncate::{TruncatedDiff, elision_marker, truncate_diff};
