//! MCP server over newline-delimited JSON-RPC on stdin/stdout.
//!
//! Requests are handled one line at a time; each tool call runs to
//! completion before the next line is read.

pub mod protocol;

use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::error::ServerError;
use crate::tools::{ToolContext, call_tool, list_tools};

use protocol::{
    CallToolParams, CallToolResult, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    JsonRpcRequest, JsonRpcResponse, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION, RpcError,
};

pub const SERVER_NAME: &str = "PR Template Analyzer";

/// Tool server bound to a [`ToolContext`].
#[derive(Debug, Clone)]
pub struct Server {
    ctx: ToolContext,
}

impl Server {
    pub fn new(ctx: ToolContext) -> Self {
        Self { ctx }
    }

    /// Serve until `reader` reaches EOF.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. Notifications produce no response.
    pub async fn handle_message(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::failure(
                    id,
                    RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
                ));
            }
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::failure(
                id,
                RpcError::new(INVALID_REQUEST, "Invalid request: jsonrpc must be \"2.0\""),
            ));
        }

        if request.is_notification() {
            debug!("Notification {}", request.method);
            return None;
        }

        let result = self.dispatch(&request).await;
        let id = request.id.unwrap_or(Value::Null);
        Some(match result {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn dispatch(&self, request: &JsonRpcRequest) -> Result<Value, RpcError> {
        debug!("Request {}", request.method);
        match request.method.as_str() {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": list_tools() })),
            "tools/call" => self.call(request.params.clone()).await,
            other => Err(RpcError::new(
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            )),
        }
    }

    async fn call(&self, params: Option<Value>) -> Result<Value, RpcError> {
        let params: CallToolParams = serde_json::from_value(params.unwrap_or(Value::Null))
            .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid params: {}", e)))?;

        let result = match call_tool(&self.ctx, &params.name, params.arguments).await {
            Ok(payload) => {
                let text = serde_json::to_string_pretty(&payload).map_err(internal_error)?;
                CallToolResult::text(text, false)
            }
            Err(e) => {
                warn!("{}", e);
                CallToolResult::text(e.to_string(), true)
            }
        };

        serde_json::to_value(result).map_err(internal_error)
    }
}

fn internal_error(e: serde_json::Error) -> RpcError {
    RpcError::new(INTERNAL_ERROR, format!("Internal error: {}", e))
}

/// Serve on the process's stdin and stdout.
pub async fn run_stdio(ctx: ToolContext) -> Result<(), ServerError> {
    info!(
        "Serving {} tools on stdio (repo {:?}, templates {:?})",
        list_tools().len(),
        ctx.repo_path,
        ctx.templates_dir
    );
    let server = Server::new(ctx);
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
