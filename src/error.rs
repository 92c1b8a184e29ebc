//! Error types for prscout modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from running the git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git executable not found in PATH")]
    NotInstalled,

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("Git command failed: git {args} exited with code {code}: {stderr}")]
    NonZeroExit {
        args: String,
        code: i32,
        stderr: String,
    },

    #[error("git {args} timed out after {seconds} seconds")]
    Timeout { args: String, seconds: u64 },
}

/// Errors from the template directory.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Failed to create template directory {path:?}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not load template: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Failed to write template {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid template name '{0}': must be a single file name without path separators")]
    InvalidName(String),

    #[error("Template '{0}' not found")]
    NotFound(String),
}

/// Errors from decoding and dispatching tool calls.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments {
        tool: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from the stdio server loop.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("I/O error on stdio transport: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}
