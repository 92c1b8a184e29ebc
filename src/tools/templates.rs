//! `get_pr_templates` tool.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value, json};

use crate::error::TemplateError;
use crate::templates::TemplateEntry;

use super::ToolContext;

const USAGE_NOTE: &str = "Each template includes metadata about when it's most suitable to use.";

/// Every template in the store with a summary.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateCatalog {
    pub templates: BTreeMap<String, TemplateEntry>,
    pub available_templates: Vec<String>,
    pub total_templates: usize,
    pub template_directory: String,
    pub usage_note: &'static str,
}

pub fn get_pr_templates(ctx: &ToolContext) -> Result<TemplateCatalog, TemplateError> {
    let store = ctx.store();
    let templates = store.get_all_templates()?;

    Ok(TemplateCatalog {
        available_templates: templates.keys().cloned().collect(),
        total_templates: templates.len(),
        template_directory: store.dir().to_string_lossy().to_string(),
        usage_note: USAGE_NOTE,
        templates,
    })
}

pub fn failure(error: &str) -> Value {
    json!({
        "error": format!("Failed to load PR templates: {}", error),
        "templates": {},
        "available_templates": [],
        "total_templates": 0,
    })
}
