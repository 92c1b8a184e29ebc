//! Tool names, descriptions and input schemas advertised to clients.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ToolError;

use super::analyze::{DEFAULT_MAX_TOKENS, DEFAULT_TARGET_BRANCH};

/// The five callable tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    AnalyzeFileChanges,
    GetPrTemplates,
    SuggestTemplate,
    GetGitStatus,
    ValidatePrDescription,
}

impl ToolName {
    pub const ALL: [ToolName; 5] = [
        ToolName::AnalyzeFileChanges,
        ToolName::GetPrTemplates,
        ToolName::SuggestTemplate,
        ToolName::GetGitStatus,
        ToolName::ValidatePrDescription,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::AnalyzeFileChanges => "analyze_file_changes",
            ToolName::GetPrTemplates => "get_pr_templates",
            ToolName::SuggestTemplate => "suggest_template",
            ToolName::GetGitStatus => "get_git_status",
            ToolName::ValidatePrDescription => "validate_pr_description",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolName::AnalyzeFileChanges => {
                "Analyze file changes between the current branch and a target branch. \
                 Returns changed files with status, diff statistics, diff content \
                 (truncated to the token budget), a change summary, branch info and \
                 recent commits."
            }
            ToolName::GetPrTemplates => {
                "Get all available PR templates with their content, metadata and file paths."
            }
            ToolName::SuggestTemplate => {
                "Suggest PR templates for the current changes. Returns basic heuristic \
                 suggestions together with the change analysis and all templates so a \
                 better recommendation can be made."
            }
            ToolName::GetGitStatus => "Get current git repository status and branch information.",
            ToolName::ValidatePrDescription => {
                "Validate a PR description against a template and change analysis."
            }
        }
    }

    /// JSON Schema for the tool's arguments object.
    pub fn input_schema(&self) -> Value {
        let target_branch = json!({
            "type": "string",
            "description": "Branch to compare against",
            "default": DEFAULT_TARGET_BRANCH,
        });
        let repo_path = json!({
            "type": "string",
            "description": "Path to git repository",
            "default": ".",
        });

        match self {
            ToolName::AnalyzeFileChanges => json!({
                "type": "object",
                "properties": {
                    "target_branch": target_branch,
                    "repo_path": repo_path,
                    "max_tokens": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Maximum tokens for diff content",
                        "default": DEFAULT_MAX_TOKENS,
                    },
                },
            }),
            ToolName::GetPrTemplates | ToolName::GetGitStatus => json!({
                "type": "object",
                "properties": {},
            }),
            ToolName::SuggestTemplate => json!({
                "type": "object",
                "properties": {
                    "change_analysis": {
                        "type": "object",
                        "description": "Pre-analyzed change data; analyzed automatically when omitted",
                    },
                    "target_branch": target_branch,
                    "repo_path": repo_path,
                },
            }),
            ToolName::ValidatePrDescription => json!({
                "type": "object",
                "properties": {
                    "description": {
                        "type": "string",
                        "description": "The PR description to validate",
                    },
                    "template_name": {
                        "type": "string",
                        "description": "Name of the template to validate against",
                    },
                    "change_analysis": {
                        "type": "object",
                        "description": "Analysis of the actual changes",
                    },
                },
                "required": ["description", "template_name"],
            }),
        }
    }

    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.as_str(),
            description: self.description(),
            input_schema: self.input_schema(),
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| ToolError::UnknownTool(s.to_string()))
    }
}

/// Entry in a `tools/list` response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Descriptors for every tool, in a fixed order.
pub fn list_tools() -> Vec<ToolDescriptor> {
    ToolName::ALL.iter().map(ToolName::descriptor).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for tool in ToolName::ALL {
            assert_eq!(tool.as_str().parse::<ToolName>().unwrap(), tool);
        }
    }

    #[test]
    fn test_unknown_name_is_error() {
        let err = "delete_repo".parse::<ToolName>().unwrap_err();
        assert!(matches!(err, ToolError::UnknownTool(name) if name == "delete_repo"));
    }

    #[test]
    fn test_descriptor_uses_camel_case_schema_key() {
        let value = serde_json::to_value(ToolName::ValidatePrDescription.descriptor()).unwrap();
        assert_eq!(value["name"], "validate_pr_description");
        assert_eq!(
            value["inputSchema"]["required"],
            json!(["description", "template_name"])
        );
        assert!(value.get("input_schema").is_none());
    }

    #[test]
    fn test_list_tools_has_all_five() {
        let names: Vec<_> = list_tools().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "analyze_file_changes",
                "get_pr_templates",
                "suggest_template",
                "get_git_status",
                "validate_pr_description",
            ]
        );
    }
}
