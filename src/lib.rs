//! prscout - An MCP tool server that helps pick and check pull request descriptions.
//!
//! # Overview
//!
//! prscout compares the current branch against a target branch with the system
//! `git` binary, loads markdown PR templates from a directory, ranks templates
//! for the change with simple heuristics, and exposes all of it as five tools
//! over a newline-delimited JSON-RPC stdio server.

pub mod error;
pub mod git;
pub mod logging;
pub mod server;
pub mod suggest;
pub mod templates;
pub mod tools;

// Re-export commonly used types
pub use error::{GitError, ServerError, TemplateError, ToolError};
pub use git::{ChangeAnalysis, ChangeExtractor, ChangeReport};
pub use server::Server;
pub use suggest::{Confidence, SuggestionResult};
pub use templates::{TemplateKind, TemplateStore};
pub use tools::{ToolContext, ToolName};
