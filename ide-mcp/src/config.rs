//! Bridge configuration
//!
//! Configuration is read from an optional YAML file. Every key is optional and
//! falls back to the defaults below, so an empty file is a valid config:
//!
//! ```yaml
//! editor:
//!   host: localhost
//!   port: 12345
//!   separator: none        # none | space
//!   connect_timeout_ms: 5000
//!   write_timeout_ms: 5000
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Host the IDE listener runs on
pub const DEFAULT_EDITOR_HOST: &str = "localhost";

/// Port the VS Code remote-control extension listens on by default
pub const DEFAULT_EDITOR_PORT: u16 = 12345;

/// Default bound for connecting to and writing to the IDE
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Outbound IDE connection settings
    pub editor: EditorConfig,
}

/// Where and how commands are sent to the IDE listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub host: String,
    pub port: u16,
    pub separator: WireSeparator,
    pub connect_timeout_ms: u64,
    pub write_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_EDITOR_HOST.to_string(),
            port: DEFAULT_EDITOR_PORT,
            separator: WireSeparator::None,
            connect_timeout_ms: DEFAULT_TIMEOUT_MS,
            write_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EditorConfig {
    /// `host:port` as used for connecting and in diagnostics
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

/// Bytes placed between the tokens of an outbound command.
///
/// The wire protocol has no framing. `None` concatenates the tokens as-is,
/// `Space` joins them with a single space, which is how the VS Code listener
/// splits a command from its argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireSeparator {
    #[default]
    None,
    Space,
}

impl WireSeparator {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireSeparator::None => "",
            WireSeparator::Space => " ",
        }
    }
}

impl FromStr for WireSeparator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(WireSeparator::None),
            "space" => Ok(WireSeparator::Space),
            other => Err(Error::Config(format!(
                "Invalid separator: {} (expected none or space)",
                other
            ))),
        }
    }
}

impl BridgeConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read {}: {}", path.display(), e))
        })?;

        // An empty document deserializes to unit, not to a mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: BridgeConfig = serde_yaml::from_str(&text)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file silently yields the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::load(path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reject values that cannot produce a usable connection
    pub fn validate(&self) -> Result<()> {
        if self.editor.host.trim().is_empty() {
            return Err(Error::Config("Editor host must not be empty".to_string()));
        }
        if self.editor.port == 0 {
            return Err(Error::Config("Editor port must not be 0".to_string()));
        }
        if self.editor.connect_timeout_ms == 0 || self.editor.write_timeout_ms == 0 {
            return Err(Error::Config("Timeouts must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Default config file location (`~/.config/ide-mcp/config.yaml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("ide-mcp").join("config.yaml"))
}
