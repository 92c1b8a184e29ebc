//! Tool facade: the five operations exposed to clients.
//!
//! Every tool answers with a JSON payload. Failures, including arguments
//! that do not decode, are reported inside the payload in the tool's own
//! error shape. Only an unknown tool name is an `Err`.

pub mod analyze;
pub mod catalog;
pub mod status;
pub mod suggest;
pub mod templates;
pub mod validate;

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::error::ToolError;
use crate::git::ChangeExtractor;
use crate::templates::TemplateStore;

pub use analyze::AnalyzeParams;
pub use catalog::{ToolDescriptor, ToolName, list_tools};
pub use suggest::SuggestParams;
pub use validate::{BasicChecks, ValidateParams};

/// Configuration shared by every tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContext {
    pub repo_path: PathBuf,
    pub templates_dir: PathBuf,
    pub git_timeout: Duration,
}

impl ToolContext {
    pub fn new(
        repo_path: impl Into<PathBuf>,
        templates_dir: impl Into<PathBuf>,
        git_timeout: Duration,
    ) -> Self {
        let ctx = Self {
            repo_path: repo_path.into(),
            templates_dir: templates_dir.into(),
            git_timeout,
        };
        // Opening the store creates the directory.
        ctx.store();
        ctx
    }

    /// Extractor for `repo_path`, where `"."` means the context repository.
    pub fn extractor(&self, repo_path: &str) -> ChangeExtractor {
        let repo = if repo_path == analyze::CONTEXT_REPO {
            self.repo_path.clone()
        } else {
            PathBuf::from(repo_path)
        };
        ChangeExtractor::new(repo, self.git_timeout)
    }

    pub fn store(&self) -> TemplateStore {
        TemplateStore::new(&self.templates_dir)
    }
}

/// Run the named tool with a JSON arguments object.
pub async fn call_tool(ctx: &ToolContext, name: &str, arguments: Value) -> Result<Value, ToolError> {
    let tool: ToolName = name.parse()?;
    debug!("Calling tool {} with {}", tool, arguments);

    let payload = match tool {
        ToolName::AnalyzeFileChanges => match decode::<AnalyzeParams>(tool, &arguments) {
            Ok(params) => render(&analyze::analyze_file_changes(ctx, &params).await),
            Err(e) => analyze::failure(&e.to_string(), &AnalyzeParams::default()),
        },
        ToolName::GetPrTemplates => match templates::get_pr_templates(ctx) {
            Ok(catalog) => render(&catalog),
            Err(e) => {
                warn!("{}", e);
                templates::failure(&e.to_string())
            }
        },
        ToolName::SuggestTemplate => match decode::<SuggestParams>(tool, &arguments) {
            Ok(params) => render(&suggest::suggest_template(ctx, params).await),
            Err(e) => suggest::failure(&e.to_string()),
        },
        ToolName::GetGitStatus => render(&status::get_git_status(ctx).await),
        ToolName::ValidatePrDescription => match decode::<ValidateParams>(tool, &arguments) {
            Ok(params) => render(&validate::validate_pr_description(ctx, params)),
            Err(e) => validate::failure(&e.to_string(), &arguments),
        },
    };

    Ok(payload)
}

/// Decode arguments; a missing or null object counts as `{}`.
fn decode<P: DeserializeOwned>(tool: ToolName, arguments: &Value) -> Result<P, ToolError> {
    let arguments = if arguments.is_null() {
        json!({})
    } else {
        arguments.clone()
    };
    serde_json::from_value(arguments).map_err(|source| {
        warn!("Invalid arguments for {}: {}", tool, source);
        ToolError::InvalidArguments {
            tool: tool.to_string(),
            source,
        }
    })
}

fn render<T: Serialize>(payload: &T) -> Value {
    serde_json::to_value(payload).unwrap_or_else(|e| json!({ "error": e.to_string() }))
}
