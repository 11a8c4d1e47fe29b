//! Outbound command channel to the IDE listener
//!
//! Every command is delivered over its own TCP connection: connect, write the
//! encoded command once, close. Nothing is read back from the IDE.
//!
//! ## Wire format
//!
//! The command token followed by its parameters, joined by the configured
//! [`WireSeparator`]. There is no length prefix and no terminator; the end of
//! the stream ends the command.

use crate::config::{EditorConfig, WireSeparator};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// A single command for the IDE
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundCommand {
    pub command: String,
    pub params: Vec<String>,
}

impl OutboundCommand {
    pub fn new(command: impl Into<String>, params: Vec<String>) -> Self {
        Self {
            command: command.into(),
            params,
        }
    }

    /// Command with exactly one parameter
    pub fn with_param(command: impl Into<String>, param: impl Into<String>) -> Self {
        Self::new(command, vec![param.into()])
    }

    /// Encode the command for the wire
    pub fn encode(&self, separator: WireSeparator) -> Vec<u8> {
        let sep = separator.as_str();
        let mut out = String::with_capacity(
            self.command.len() + self.params.iter().map(|p| p.len() + sep.len()).sum::<usize>(),
        );
        out.push_str(&self.command);
        for param in &self.params {
            out.push_str(sep);
            out.push_str(param);
        }
        out.into_bytes()
    }
}

/// Destination for outbound commands.
///
/// Tool handlers depend on this trait rather than on a socket, so tests can
/// record commands instead of sending them.
#[async_trait]
pub trait CommandSink: Send + Sync {
    /// Deliver one command. Errors are returned, never panicked on.
    async fn send(&self, command: &OutboundCommand) -> Result<()>;
}

/// Sends each command over a fresh TCP connection
#[derive(Debug, Clone)]
pub struct TcpCommandChannel {
    config: EditorConfig,
}

impl TcpCommandChannel {
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    pub fn address(&self) -> String {
        self.config.address()
    }
}

impl Default for TcpCommandChannel {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[async_trait]
impl CommandSink for TcpCommandChannel {
    async fn send(&self, command: &OutboundCommand) -> Result<()> {
        let addr = self.config.address();
        let payload = command.encode(self.config.separator);

        let connect_timeout = self.config.connect_timeout();
        let mut stream = match timeout(connect_timeout, TcpStream::connect(&addr)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(Error::EditorConnect { addr, source }),
            Err(_) => {
                return Err(Error::EditorTimeout {
                    op: "connect",
                    addr,
                    timeout: connect_timeout,
                })
            }
        };

        tracing::debug!(
            "Sending {} ({} bytes) to {}",
            command.command,
            payload.len(),
            addr
        );

        let write_timeout = self.config.write_timeout();
        let written = timeout(write_timeout, async {
            stream.write_all(&payload).await?;
            stream.shutdown().await
        })
        .await;

        // The stream is dropped here on every path, closing the connection
        drop(stream);

        match written {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(Error::EditorWrite { addr, source }),
            Err(_) => Err(Error::EditorTimeout {
                op: "write",
                addr,
                timeout: write_timeout,
            }),
        }
    }
}
