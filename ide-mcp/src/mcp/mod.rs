//! MCP (Model Context Protocol) server for the IDE bridge
//!
//! This module implements an MCP server using stdio transport. Each tool call
//! is validated against the tool's declared parameters and handed to its
//! handler, which talks to the IDE through the [`crate::editor`] channel.
//!
//! ## Tools Exposed
//!
//! - `open_content_in_editor` - Show literal content in a new editor
//! - `open_file_in_editor` - Open a file by path
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ide_mcp::editor::TcpCommandChannel;
//! use ide_mcp::mcp::{tools::default_registry, McpServer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = default_registry(Arc::new(TcpCommandChannel::default())).unwrap();
//!     McpServer::new(registry).run().await.unwrap();
//! }
//! ```

mod args;
mod dispatch;
mod protocol;
mod registry;
mod server;
pub mod tools;

pub use args::{extract_arguments, ArgValue, ArgumentError, ToolArgs, INVALID_ARGUMENTS};
pub use dispatch::{Dispatcher, ToolInvocation};
pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolContent, ToolDefinition, ToolResult,
    MCP_PROTOCOL_VERSION,
};
pub use registry::{
    ParamKind, ParamSpec, RegisteredTool, ToolDescriptor, ToolHandler, ToolRegistry,
    ToolRegistryBuilder,
};
pub use server::McpServer;
