//! Heuristic template suggestions from a change analysis.
//!
//! This is a crude pre-filter: it counts file kinds by substring
//! markers and scans a handful of text fields for keywords. Confidence is
//! always reported as low, and the full analysis travels with the result so
//! a downstream reasoner can do better.

use serde::{Deserialize, Serialize};

use crate::git::ChangeAnalysis;
use crate::templates::TemplateKind;

const DOC_MARKERS: &[&str] = &[".md", ".txt", ".rst", "readme", "docs/"];
const TEST_MARKERS: &[&str] = &["test_", "_test", "spec_", "_spec", "tests/"];
const CONFIG_MARKERS: &[&str] = &[".json", ".yaml", ".yml", ".toml", ".ini", "config"];

const BUGFIX_KEYWORDS: &[&str] = &["fix", "bug", "error", "issue"];
const HOTFIX_KEYWORDS: &[&str] = &["critical", "urgent", "hotfix", "production"];

const REASONING: &str =
    "Basic heuristic analysis from file types and keywords; review the change analysis for a better recommendation";

/// Bucket a changed file falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileBucket {
    Docs,
    Test,
    Config,
    Code,
}

/// Classify a filename, case-insensitively; the first matching bucket wins.
pub fn classify_file(filename: &str) -> FileBucket {
    let lower = filename.to_lowercase();
    let has_any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));

    if has_any(DOC_MARKERS) {
        FileBucket::Docs
    } else if has_any(TEST_MARKERS) {
        FileBucket::Test
    } else if has_any(CONFIG_MARKERS) {
        FileBucket::Config
    } else {
        FileBucket::Code
    }
}

/// Number of files per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub docs: usize,
    pub tests: usize,
    pub config: usize,
    pub code: usize,
}

impl BucketCounts {
    pub fn from_filenames<'a>(filenames: impl IntoIterator<Item = &'a str>) -> Self {
        let mut counts = Self::default();
        for filename in filenames {
            match classify_file(filename) {
                FileBucket::Docs => counts.docs += 1,
                FileBucket::Test => counts.tests += 1,
                FileBucket::Config => counts.config += 1,
                FileBucket::Code => counts.code += 1,
            }
        }
        counts
    }
}

/// How much weight a suggestion deserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    None,
    Low,
}

/// Ranked template suggestions plus the analysis they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub primary_suggestions: Vec<String>,
    pub secondary_suggestions: Vec<String>,
    pub confidence: Confidence,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_data: Option<ChangeAnalysis>,
}

impl SuggestionResult {
    /// Fallback returned when no analysis could be made at all.
    pub fn fallback() -> Self {
        Self {
            primary_suggestions: names(&[TemplateKind::Feature]),
            secondary_suggestions: Vec::new(),
            confidence: Confidence::None,
            reasoning: None,
            analysis_data: None,
        }
    }
}

fn names(kinds: &[TemplateKind]) -> Vec<String> {
    kinds.iter().map(|k| k.name().to_string()).collect()
}

/// Lowercased text the keyword rules search: the compared range, every
/// filename, every commit subject and any extraction error.
pub fn search_text(analysis: &ChangeAnalysis) -> String {
    let report = &analysis.report;
    let mut parts: Vec<&str> = vec![&report.branch_comparison];
    parts.extend(report.file_changes.iter().map(|c| c.filename.as_str()));
    parts.extend(analysis.commit_messages());
    if let Some(error) = &report.error {
        parts.push(error);
    }
    parts.join("\n").to_lowercase()
}

/// Rank templates for an analysis. Pure: same input, same output.
///
/// Rules, first match wins:
/// 1. no changed files: feature
/// 2. more docs than code: docs, then feature
/// 3. bug keywords: bugfix, then feature
/// 4. urgency keywords: hotfix, then bugfix
/// 5. otherwise: feature, then docs and bugfix
pub fn suggest(analysis: &ChangeAnalysis) -> SuggestionResult {
    let changes = &analysis.report.file_changes;
    let counts = BucketCounts::from_filenames(changes.iter().map(|c| c.filename.as_str()));
    let text = search_text(analysis);
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    let (primary, secondary) = if changes.is_empty() {
        (vec![TemplateKind::Feature], vec![])
    } else if counts.docs > counts.code {
        (vec![TemplateKind::Docs], vec![TemplateKind::Feature])
    } else if mentions(BUGFIX_KEYWORDS) {
        (vec![TemplateKind::Bugfix], vec![TemplateKind::Feature])
    } else if mentions(HOTFIX_KEYWORDS) {
        (vec![TemplateKind::Hotfix], vec![TemplateKind::Bugfix])
    } else {
        (
            vec![TemplateKind::Feature],
            vec![TemplateKind::Docs, TemplateKind::Bugfix],
        )
    };

    SuggestionResult {
        primary_suggestions: names(&primary),
        secondary_suggestions: names(&secondary),
        confidence: Confidence::Low,
        reasoning: Some(REASONING.to_string()),
        analysis_data: Some(analysis.clone()),
    }
}
