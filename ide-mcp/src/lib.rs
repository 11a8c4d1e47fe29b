//! # IDE MCP - remote control an IDE from MCP clients
//!
//! Exposes editor actions as Model Context Protocol tools. Every tool call is
//! translated into a one-shot command written to a listener running inside the
//! IDE (the VS Code remote-control extension listens on `localhost:12345`).
//!
//! The crate provides:
//! - **Tool registry and dispatch** with schema-checked, typed arguments
//! - **Editor command channel**: connect, write one command, close
//! - **MCP server** over stdio
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ide_mcp::{BridgeConfig, TcpCommandChannel};
//! use ide_mcp::mcp::{tools::default_registry, McpServer};
//! use std::sync::Arc;
//!
//! let config = BridgeConfig::load_or_default(None)?;
//! let channel = TcpCommandChannel::new(config.editor.clone());
//! let server = McpServer::new(default_registry(Arc::new(channel))?);
//! server.run().await?;
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod mcp;

// Re-exports for convenience
pub use config::{BridgeConfig, EditorConfig, WireSeparator};
pub use editor::{CommandSink, OutboundCommand, TcpCommandChannel};
pub use error::{Error, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
