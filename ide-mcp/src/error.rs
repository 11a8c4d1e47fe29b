//! Error types for the IDE MCP bridge

use std::time::Duration;
use thiserror::Error;

/// Bridge error type
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool descriptor is malformed (empty name, duplicate parameter)
    #[error("Invalid tool: {0}")]
    InvalidTool(String),

    /// A tool with the same name is already registered
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    /// No tool registered under this name
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Could not connect to the IDE listener
    #[error("could not connect to {addr}: {source}")]
    EditorConnect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not write the command to the IDE listener
    #[error("could not write to {addr}: {source}")]
    EditorWrite {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Connecting or writing took longer than the configured timeout
    #[error("{op} to {addr} timed out after {}ms", .timeout.as_millis())]
    EditorTimeout {
        op: &'static str,
        addr: String,
        timeout: Duration,
    },
}

/// Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(format!("Invalid config file: {}", err))
    }
}
