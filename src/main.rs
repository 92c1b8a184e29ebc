//! prscout - CLI entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;

use prscout::git::default_timeout;
use prscout::logging::init_tracing;
use prscout::server::run_stdio;
use prscout::tools::{ToolContext, call_tool};

/// Analyze git changes and suggest pull request templates over MCP.
#[derive(Parser, Debug)]
#[command(name = "prscout")]
#[command(about = "MCP server that analyzes git changes and suggests PR templates")]
#[command(version)]
struct Cli {
    /// Git repository to analyze
    #[arg(long, env = "PRSCOUT_REPO", default_value = ".", global = true)]
    repo: PathBuf,

    /// Directory holding <name>.md PR templates
    #[arg(long, env = "PRSCOUT_TEMPLATES_DIR", default_value = "templates", global = true)]
    templates_dir: PathBuf,

    /// Seconds before a git command is killed (defaults to PRSCOUT_GIT_TIMEOUT, else 30)
    #[arg(long, global = true)]
    git_timeout: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve tools over JSON-RPC on stdin/stdout (default)
    Serve,

    /// Run a single tool and print its JSON result
    Call {
        /// Tool name, e.g. suggest_template
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Write the built-in templates that are missing from the templates directory
    InitTemplates,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let git_timeout = cli
        .git_timeout
        .map(Duration::from_secs)
        .unwrap_or_else(default_timeout);
    let ctx = ToolContext::new(cli.repo, cli.templates_dir, git_timeout);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_stdio(ctx).await.context("MCP server failed")?,
        Command::Call { tool, args } => {
            let arguments: Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            let payload = call_tool(&ctx, &tool, arguments).await?;
            let text =
                serde_json::to_string_pretty(&payload).context("Failed to render tool result")?;
            println!("{}", text);
        }
        Command::InitTemplates => {
            let store = ctx.store();
            let written = store
                .seed_builtin_templates()
                .with_context(|| format!("Failed to seed templates in {:?}", store.dir()))?;

            if written.is_empty() {
                println!("All built-in templates already present in {:?}", store.dir());
            } else {
                println!("✓ Wrote {} to {:?}", written.join(", "), store.dir());
            }
        }
    }

    Ok(())
}
