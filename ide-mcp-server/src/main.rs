//! IDE MCP Server
//!
//! A Model Context Protocol (MCP) server that lets AI agents open editors in a
//! running IDE. Tool calls arrive over stdio; each one is forwarded to the IDE's
//! remote-control listener as a single TCP command.
//!
//! ## Usage
//!
//! ```bash
//! # Start the stdio server, talking to the IDE on localhost:12345
//! ide-mcp-server
//!
//! # Talk to an IDE listening on another port, space-separated commands
//! ide-mcp-server --editor-port 23456 --separator space
//!
//! # Verbose logging (to stderr)
//! ide-mcp-server --verbose
//!
//! # Show version information
//! ide-mcp-server --version
//! ```
//!
//! ## MCP Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "ide": {
//!       "command": "ide-mcp-server",
//!       "args": ["--editor-port", "12345"]
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use ide_mcp::mcp::{tools::default_registry, McpServer};
use ide_mcp::{BridgeConfig, TcpCommandChannel, WireSeparator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// IDE MCP Server - Remote control an IDE via Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "ide-mcp-server")]
#[command(
    author,
    version,
    about = "IDE MCP Server - Model Context Protocol interface for IDE remote control"
)]
struct Args {
    /// Path to a YAML config file (default: ~/.config/ide-mcp/config.yaml if present)
    #[arg(long, short = 'c', env = "IDE_MCP_CONFIG")]
    config: Option<PathBuf>,

    /// Host the IDE listener runs on
    #[arg(long, env = "IDE_MCP_EDITOR_HOST")]
    editor_host: Option<String>,

    /// Port the IDE listener runs on
    #[arg(long, env = "IDE_MCP_EDITOR_PORT")]
    editor_port: Option<u16>,

    /// Separator between command tokens: none or space
    #[arg(long, env = "IDE_MCP_SEPARATOR")]
    separator: Option<WireSeparator>,

    /// Connect and write timeout for the IDE connection, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Log filter (e.g. "debug", "ide_mcp=trace"); overrides --verbose
    #[arg(long, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    /// Load the config file and apply command line overrides
    fn resolve_config(&self) -> Result<BridgeConfig> {
        let mut config = BridgeConfig::load_or_default(self.config.as_deref())?;

        if let Some(host) = &self.editor_host {
            config.editor.host = host.clone();
        }
        if let Some(port) = self.editor_port {
            config.editor.port = port;
        }
        if let Some(separator) = self.separator {
            config.editor.separator = separator;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.editor.connect_timeout_ms = timeout_ms;
            config.editor.write_timeout_ms = timeout_ms;
        }

        config.validate()?;
        Ok(config)
    }

    fn log_filter(&self) -> EnvFilter {
        match &self.log_level {
            Some(filter) => EnvFilter::new(filter),
            None if self.verbose => EnvFilter::new("debug"),
            // By default, suppress all logging to avoid interfering with MCP protocol
            None => EnvFilter::new("error"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(args.log_filter())
        .init();

    let config = args.resolve_config().context("Invalid configuration")?;

    let channel = TcpCommandChannel::new(config.editor);
    tracing::info!(
        "Starting IDE MCP server {} (editor at {})",
        ide_mcp::VERSION,
        channel.address()
    );

    let registry = default_registry(Arc::new(channel)).context("Failed to register tools")?;

    McpServer::new(registry).run().await?;

    Ok(())
}
