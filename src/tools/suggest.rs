//! `suggest_template` tool.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::warn;

use crate::git::{ChangeAnalysis, ChangeSummary};
use crate::suggest::{SuggestionResult, suggest};
use crate::templates::TemplateEntry;

use super::ToolContext;
use super::analyze::{AnalyzeParams, CONTEXT_REPO, DEFAULT_TARGET_BRANCH, analyze_file_changes};

const RECOMMENDATION_NOTE: &str = "The 'suggested_templates' field contains basic heuristic suggestions. \
     Use the 'change_analysis' and 'available_templates' data to make more intelligent \
     recommendations based on the actual code changes.";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SuggestParams {
    /// Previously computed analysis; analyzed fresh when absent.
    pub change_analysis: Option<ChangeAnalysis>,
    pub target_branch: String,
    pub repo_path: String,
}

impl Default for SuggestParams {
    fn default() -> Self {
        Self {
            change_analysis: None,
            target_branch: DEFAULT_TARGET_BRANCH.to_string(),
            repo_path: CONTEXT_REPO.to_string(),
        }
    }
}

/// Headline numbers pulled out of the analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisMetadata {
    pub files_changed: usize,
    pub change_types: ChangeSummary,
    pub branch_comparison: String,
    pub has_diff_content: bool,
    pub diff_truncated: bool,
}

impl AnalysisMetadata {
    pub fn from_analysis(analysis: &ChangeAnalysis) -> Self {
        let report = &analysis.report;
        Self {
            files_changed: report.total_files_changed,
            change_types: report.change_summary.clone(),
            branch_comparison: report.branch_comparison.clone(),
            has_diff_content: !report.diff_content.is_empty(),
            diff_truncated: report.truncated,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateSuggestion {
    pub suggested_templates: SuggestionResult,
    pub change_analysis: ChangeAnalysis,
    pub available_templates: BTreeMap<String, TemplateEntry>,
    pub analysis_metadata: AnalysisMetadata,
    pub recommendation_note: &'static str,
}

/// Rank templates for the supplied analysis, or for a fresh one.
///
/// An unreadable template directory leaves `available_templates` empty.
pub async fn suggest_template(ctx: &ToolContext, params: SuggestParams) -> TemplateSuggestion {
    let change_analysis = match params.change_analysis {
        Some(analysis) => analysis,
        None => {
            let analyze = AnalyzeParams {
                target_branch: params.target_branch,
                repo_path: params.repo_path,
                ..AnalyzeParams::default()
            };
            analyze_file_changes(ctx, &analyze).await
        }
    };

    let available_templates = ctx.store().get_all_templates().unwrap_or_else(|e| {
        warn!("Failed to load templates for suggestion: {}", e);
        BTreeMap::new()
    });

    TemplateSuggestion {
        suggested_templates: suggest(&change_analysis),
        analysis_metadata: AnalysisMetadata::from_analysis(&change_analysis),
        change_analysis,
        available_templates,
        recommendation_note: RECOMMENDATION_NOTE,
    }
}

pub fn failure(error: &str) -> Value {
    json!({
        "error": format!("Failed to suggest templates: {}", error),
        "suggested_templates": SuggestionResult::fallback(),
        "change_analysis": {},
        "available_templates": {},
    })
}
