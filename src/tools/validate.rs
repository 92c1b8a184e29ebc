//! `validate_pr_description` tool.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::TemplateError;

use super::ToolContext;

/// Exclusive character bounds for a reasonable description.
const MIN_REASONABLE_CHARS: usize = 10;
const MAX_REASONABLE_CHARS: usize = 5000;

const CHECKLIST_MARKERS: [&str; 2] = ["- [ ]", "- [x]"];

const VALIDATION_NOTE: &str = "This provides basic validation data. Use a deeper analysis \
     to determine if the description adequately covers the changes and follows the \
     template structure.";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidateParams {
    pub description: String,
    pub template_name: String,
    /// Echoed back untouched.
    #[serde(default)]
    pub change_analysis: Option<Value>,
}

/// Structural checks on a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasicChecks {
    pub has_description: bool,
    pub reasonable_length: bool,
    pub contains_checklist: bool,
}

impl BasicChecks {
    pub fn of(description: &str) -> Self {
        let chars = description.chars().count();
        Self {
            has_description: !description.trim().is_empty(),
            reasonable_length: MIN_REASONABLE_CHARS < chars && chars < MAX_REASONABLE_CHARS,
            contains_checklist: CHECKLIST_MARKERS.iter().any(|m| description.contains(m)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub template_used: String,
    pub description_length: usize,
    pub template_content: String,
    pub change_analysis: Value,
    pub basic_checks: BasicChecks,
    pub validation_note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Validation {
    Checked(ValidationReport),
    UnknownTemplate {
        valid: bool,
        error: String,
        available_templates: Vec<String>,
    },
}

/// Check a description against a named template.
///
/// Only the structural checks are computed here; the template body and the
/// analysis are returned so a reviewer can judge coverage.
pub fn validate_pr_description(ctx: &ToolContext, params: ValidateParams) -> Validation {
    let store = ctx.store();
    let Some(template) = store.get_template(&params.template_name) else {
        return Validation::UnknownTemplate {
            valid: false,
            error: TemplateError::NotFound(params.template_name).to_string(),
            available_templates: store.list_available_templates(),
        };
    };

    let change_analysis = params
        .change_analysis
        .filter(|v| !v.is_null())
        .unwrap_or_else(|| json!({}));

    Validation::Checked(ValidationReport {
        description_length: params.description.chars().count(),
        template_content: template.content().unwrap_or_default().to_string(),
        basic_checks: BasicChecks::of(&params.description),
        template_used: params.template_name,
        change_analysis,
        validation_note: VALIDATION_NOTE,
    })
}

/// Payload for a call whose arguments could not be decoded.
pub fn failure(error: &str, arguments: &Value) -> Value {
    json!({
        "valid": false,
        "error": format!("Validation failed: {}", error),
        "template_used": arguments.get("template_name").cloned().unwrap_or(Value::Null),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn context_with(templates: &[(&str, &str)]) -> (tempfile::TempDir, ToolContext) {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ToolContext::new(dir.path(), dir.path().join("templates"), Duration::from_secs(5));
        for (name, content) in templates {
            std::fs::write(ctx.templates_dir.join(format!("{}.md", name)), content).unwrap();
        }
        (dir, ctx)
    }

    fn params(description: &str, template_name: &str) -> ValidateParams {
        ValidateParams {
            description: description.to_string(),
            template_name: template_name.to_string(),
            change_analysis: None,
        }
    }

    #[test]
    fn test_basic_checks_bounds() {
        assert_eq!(
            BasicChecks::of(""),
            BasicChecks {
                has_description: false,
                reasonable_length: false,
                contains_checklist: false,
            }
        );
        assert!(!BasicChecks::of("0123456789").reasonable_length);
        assert!(BasicChecks::of("0123456789a").reasonable_length);
        assert!(!BasicChecks::of(&"x".repeat(5000)).reasonable_length);
        assert!(BasicChecks::of(&"x".repeat(4999)).reasonable_length);
        assert!(!BasicChecks::of("   \n\t").has_description);
    }

    #[test]
    fn test_checklist_detection() {
        assert!(BasicChecks::of("- [ ] tests").contains_checklist);
        assert!(BasicChecks::of("- [x] tests").contains_checklist);
        assert!(!BasicChecks::of("- [X] tests").contains_checklist);
    }

    #[test]
    fn test_length_counts_chars() {
        let (_dir, ctx) = context_with(&[("feature", "## Feature")]);
        let Validation::Checked(report) = validate_pr_description(&ctx, params("héllo wörld", "feature"))
        else {
            panic!("Expected a checked validation");
        };
        assert_eq!(report.description_length, 11);
        assert!(report.basic_checks.reasonable_length);
        assert_eq!(report.template_content, "## Feature");
        assert_eq!(report.change_analysis, json!({}));
    }

    #[test]
    fn test_change_analysis_is_echoed() {
        let (_dir, ctx) = context_with(&[("docs", "D")]);
        let mut p = params("Updated the README", "docs");
        p.change_analysis = Some(json!({"total_files_changed": 3, "extra": true}));

        let value = serde_json::to_value(validate_pr_description(&ctx, p)).unwrap();
        assert_eq!(value["change_analysis"]["extra"], true);
        assert_eq!(value["template_used"], "docs");
        assert!(value.get("valid").is_none());
    }

    #[test]
    fn test_unknown_template_lists_available() {
        let (_dir, ctx) = context_with(&[("feature", "F"), ("bugfix", "B")]);
        let value = serde_json::to_value(validate_pr_description(&ctx, params("x", "nonexistent")))
            .unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["error"], "Template 'nonexistent' not found");
        assert_eq!(value["available_templates"], json!(["bugfix", "feature"]));
    }

    #[test]
    fn test_failure_keeps_template_name() {
        let value = failure("missing field `description`", &json!({"template_name": "feature"}));
        assert_eq!(value["valid"], false);
        assert_eq!(value["template_used"], "feature");
    }
}
