//! MCP server implementation
//!
//! Implements the stdio transport for the Model Context Protocol: one JSON-RPC
//! message per line in, one response per line out.

use super::dispatch::{Dispatcher, ToolInvocation};
use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    MCP_PROTOCOL_VERSION,
};
use super::registry::ToolRegistry;
use crate::error::Error;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// MCP server bridging tool calls to the IDE
///
/// Owns the dispatcher (and through it the tool registry) and speaks
/// JSON-RPC 2.0 over any line-oriented stream.
#[derive(Debug, Clone)]
pub struct McpServer {
    dispatcher: Dispatcher,
}

impl McpServer {
    /// Create a new MCP server around a built registry
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::new(registry)),
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run the MCP server on stdio
    ///
    /// Handles requests until EOF is received or an error occurs.
    pub async fn run(&self) -> crate::Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve requests from `reader`, writing responses to `writer`
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!(
            "IDE MCP server started (protocol version {}, {} tools)",
            MCP_PROTOCOL_VERSION,
            self.dispatcher.registry().len()
        );

        let mut frame = Vec::new();
        loop {
            frame.clear();
            match reader.read_until(b'\n', &mut frame).await {
                Ok(0) => {
                    tracing::info!("EOF received, shutting down");
                    break;
                }
                Ok(_) => {
                    let response = match std::str::from_utf8(&frame) {
                        Ok(line) => {
                            let trimmed = line.trim();
                            if trimmed.is_empty() {
                                continue;
                            }
                            tracing::debug!("Received: {}", trimmed);
                            self.handle_line(trimmed).await
                        }
                        Err(e) => {
                            tracing::warn!("Discarding non UTF-8 frame: {}", e);
                            Some(JsonRpcResponse::error(
                                None,
                                JsonRpcError::parse_error(format!("Parse error: {}", e)),
                            ))
                        }
                    };

                    if let Some(response) = response {
                        let response_json = serde_json::to_string(&response)?;
                        writer.write_all(response_json.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;
                        tracing::debug!("Sent: {}", response_json);
                    }
                }
                Err(e) => {
                    tracing::error!("Read error: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    /// Parse one frame and handle it
    async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                None,
                JsonRpcError::parse_error(format!("Parse error: {}", e)),
            )),
        }
    }

    /// Handle a single JSON-RPC request.
    ///
    /// Notifications (no `id` member, or any `notifications/*` method) get no
    /// response. An explicit `"id": null` is answered with `"id": null`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.method.starts_with("notifications/") {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(&request.params).await,
            "ping" => Ok(json!({})),
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        // A request without an id is a notification
        request.id.as_ref()?;

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(error) => JsonRpcResponse::error(request.id, error),
        })
    }

    /// Handle initialize request
    fn handle_initialize(&self, _params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let capabilities = ServerCapabilities::default();
        let server_info = ServerInfo::default();

        Ok(json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": capabilities,
            "serverInfo": server_info
        }))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self) -> Result<Value, JsonRpcError> {
        let tools = self.dispatcher.registry().definitions();
        Ok(json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params
            .as_ref()
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self
            .dispatcher
            .dispatch(ToolInvocation::new(tool_name, arguments))
            .await
            .map_err(|e| match e {
                Error::UnknownTool(_) => JsonRpcError::invalid_params(e.to_string()),
                other => JsonRpcError::internal_error(other.to_string()),
            })?;

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}
