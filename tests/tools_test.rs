//! Integration tests for the tool facade against real repositories.

mod common;

use std::time::Duration;

use common::{BASE_BRANCH, TestRepo, repo_with_feature_branch};
use prscout::TemplateKind;
use prscout::tools::{ToolContext, call_tool};
use serde_json::{Value, json};

async fn call(ctx: &ToolContext, tool: &str, arguments: Value) -> Value {
    call_tool(ctx, tool, arguments).await.expect("known tool")
}

fn seeded_context(repo: &TestRepo) -> ToolContext {
    let ctx = repo.context();
    ctx.store().seed_builtin_templates().expect("Failed to seed templates");
    ctx
}

// =============================================================================
// analyze_file_changes
// =============================================================================

#[tokio::test]
async fn test_analyze_file_changes_payload() {
    let repo = repo_with_feature_branch("feat: add widget");
    let ctx = repo.context();

    let value = call(&ctx, "analyze_file_changes", json!({"target_branch": BASE_BRANCH})).await;

    assert!(value.get("error").is_none());
    assert_eq!(value["branch_comparison"], "base...HEAD");
    assert_eq!(value["total_files_changed"], 3);
    assert_eq!(value["change_summary"]["added"], 1);
    assert_eq!(value["branch_info"]["is_git_repo"], true);
    assert_eq!(value["recent_commits"][1]["message"], "feat: add widget");
    assert_eq!(value["tool_version"], env!("CARGO_PKG_VERSION"));
    assert!(value["analysis_timestamp"].is_string());
}

#[tokio::test]
async fn test_repo_path_override_is_per_call() {
    let repo = repo_with_feature_branch("feat: add widget");
    let elsewhere = tempfile::tempdir().unwrap();
    let ctx = ToolContext::new(
        elsewhere.path(),
        elsewhere.path().join("templates"),
        Duration::from_secs(30),
    );

    let value = call(
        &ctx,
        "analyze_file_changes",
        json!({"target_branch": BASE_BRANCH, "repo_path": repo.path()}),
    )
    .await;
    assert_eq!(value["total_files_changed"], 3);

    // The context still points at the non-repository directory.
    let status = call(&ctx, "get_git_status", json!({})).await;
    assert_eq!(status["is_git_repo"], false);
}

// =============================================================================
// get_pr_templates / get_git_status
// =============================================================================

#[tokio::test]
async fn test_get_pr_templates_lists_seeded_templates() {
    let repo = TestRepo::new();
    let ctx = seeded_context(&repo);

    let value = call(&ctx, "get_pr_templates", json!({})).await;

    assert_eq!(value["total_templates"], 4);
    assert_eq!(
        value["available_templates"],
        json!(["bugfix", "docs", "feature", "hotfix"])
    );
    assert_eq!(value["templates"]["hotfix"]["metadata"]["name"], "Hotfix");
    assert_eq!(
        value["templates"]["docs"]["content"],
        TemplateKind::Docs.builtin_content().unwrap()
    );
    assert!(value["template_directory"].as_str().unwrap().ends_with("templates"));
    assert!(value["usage_note"].is_string());
}

#[tokio::test]
async fn test_get_git_status_in_repository() {
    let repo = repo_with_feature_branch("feat: add widget");
    let ctx = repo.context();

    let value = call(&ctx, "get_git_status", json!({})).await;

    assert_eq!(value["status"], "success");
    assert_eq!(value["is_git_repo"], true);
    assert!(value["current_branch"].is_string());
    assert_eq!(value["remote_branches"], json!([]));
    assert!(value.get("error").is_none());
}

// =============================================================================
// suggest_template
// =============================================================================

#[tokio::test]
async fn test_suggest_template_analyzes_when_no_analysis_given() {
    let repo = repo_with_feature_branch("fix: crash on empty input");
    let ctx = seeded_context(&repo);

    let value = call(&ctx, "suggest_template", json!({"target_branch": BASE_BRANCH})).await;

    assert_eq!(value["suggested_templates"]["primary_suggestions"], json!(["bugfix"]));
    assert_eq!(value["suggested_templates"]["secondary_suggestions"], json!(["feature"]));
    assert_eq!(value["suggested_templates"]["confidence"], "low");
    assert_eq!(value["analysis_metadata"]["files_changed"], 3);
    assert_eq!(value["analysis_metadata"]["branch_comparison"], "base...HEAD");
    assert_eq!(value["analysis_metadata"]["has_diff_content"], true);
    assert_eq!(value["analysis_metadata"]["diff_truncated"], false);
    assert_eq!(value["change_analysis"]["total_files_changed"], 3);
    assert_eq!(value["available_templates"].as_object().unwrap().len(), 4);
    assert!(value["recommendation_note"].is_string());
}

#[tokio::test]
async fn test_suggest_template_defaults_to_feature() {
    let repo = repo_with_feature_branch("feat: add widget");
    let ctx = seeded_context(&repo);

    let value = call(&ctx, "suggest_template", json!({"target_branch": BASE_BRANCH})).await;

    assert_eq!(value["suggested_templates"]["primary_suggestions"], json!(["feature"]));
    assert_eq!(
        value["suggested_templates"]["secondary_suggestions"],
        json!(["docs", "bugfix"])
    );
}

#[tokio::test]
async fn test_suggest_template_with_failed_analysis_still_answers() {
    let repo = repo_with_feature_branch("feat: add widget");
    let ctx = seeded_context(&repo);

    let value = call(&ctx, "suggest_template", json!({"target_branch": "no-such-branch"})).await;

    // No files changed, so the first rule applies.
    assert_eq!(value["suggested_templates"]["primary_suggestions"], json!(["feature"]));
    assert!(value["change_analysis"]["error"].is_string());
    assert_eq!(value["analysis_metadata"]["files_changed"], 0);
}

// =============================================================================
// validate_pr_description
// =============================================================================

#[tokio::test]
async fn test_validate_empty_description() {
    let repo = TestRepo::new();
    let ctx = seeded_context(&repo);

    let value = call(
        &ctx,
        "validate_pr_description",
        json!({"description": "", "template_name": "feature"}),
    )
    .await;

    assert_eq!(value["template_used"], "feature");
    assert_eq!(value["description_length"], 0);
    assert_eq!(value["basic_checks"]["has_description"], false);
    assert_eq!(value["basic_checks"]["reasonable_length"], false);
    assert_eq!(value["basic_checks"]["contains_checklist"], false);
    assert_eq!(
        value["template_content"],
        TemplateKind::Feature.builtin_content().unwrap()
    );
    assert_eq!(value["change_analysis"], json!({}));
}

#[tokio::test]
async fn test_validate_filled_in_description() {
    let repo = TestRepo::new();
    let ctx = seeded_context(&repo);
    let description = "## Summary\nAdds the widget panel.\n\n- [x] Tests added\n- [ ] Docs updated";

    let value = call(
        &ctx,
        "validate_pr_description",
        json!({"description": description, "template_name": "feature"}),
    )
    .await;

    assert_eq!(value["description_length"], description.chars().count());
    assert_eq!(value["basic_checks"]["has_description"], true);
    assert_eq!(value["basic_checks"]["reasonable_length"], true);
    assert_eq!(value["basic_checks"]["contains_checklist"], true);
}

#[tokio::test]
async fn test_validate_unknown_template() {
    let repo = TestRepo::new();
    let ctx = seeded_context(&repo);

    let value = call(
        &ctx,
        "validate_pr_description",
        json!({"description": "x", "template_name": "nonexistent"}),
    )
    .await;

    assert_eq!(value["valid"], false);
    assert_eq!(value["error"], "Template 'nonexistent' not found");
    assert_eq!(
        value["available_templates"],
        json!(["bugfix", "docs", "feature", "hotfix"])
    );
}

#[tokio::test]
async fn test_custom_template_is_usable() {
    let repo = TestRepo::new();
    let ctx = repo.context();
    assert!(ctx.store().create_custom_template("security", "## Threat model\n- [ ] Reviewed"));

    let templates = call(&ctx, "get_pr_templates", json!({})).await;
    assert_eq!(templates["templates"]["security"]["metadata"]["name"], "Security");
    assert_eq!(
        templates["templates"]["security"]["metadata"]["description"],
        "Template for security"
    );

    let value = call(
        &ctx,
        "validate_pr_description",
        json!({"description": "Hardened the login flow", "template_name": "security"}),
    )
    .await;
    assert_eq!(value["template_content"], "## Threat model\n- [ ] Reviewed");
}
