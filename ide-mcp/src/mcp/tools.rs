//! Editor tools
//!
//! Each tool forwards its argument to the IDE as a single outbound command.

use super::args::ToolArgs;
use super::protocol::ToolResult;
use super::registry::{ParamSpec, ToolDescriptor, ToolHandler, ToolRegistry};
use crate::editor::{CommandSink, OutboundCommand};
use async_trait::async_trait;
use std::sync::Arc;

/// Opens an editor showing literal content
pub const OPEN_CONTENT_TOOL: &str = "open_content_in_editor";
/// Opens a file in an editor
pub const OPEN_FILE_TOOL: &str = "open_file_in_editor";

/// Command token understood by the IDE for showing content
pub const OPEN_EDITOR_COMMAND: &str = "open_editor";
/// Command token understood by the IDE for opening a file by path
pub const OPEN_FILE_COMMAND: &str = "openFile";

const PARAM_CONTENT: &str = "content";
const PARAM_FILE_PATH: &str = "filePath";

/// Build the registry with every editor tool bound to `sink`
pub fn default_registry(sink: Arc<dyn CommandSink>) -> crate::Result<ToolRegistry> {
    Ok(ToolRegistry::builder()
        .register(
            ToolDescriptor::new(OPEN_CONTENT_TOOL, "Opens an editor with the specified content")
                .param(
                    ParamSpec::string(PARAM_CONTENT, "content to show in the editor").required(),
                ),
            Arc::new(OpenContentTool::new(sink.clone())),
        )?
        .register(
            ToolDescriptor::new(OPEN_FILE_TOOL, "Opens the file at the specified path in an editor")
                .param(ParamSpec::string(PARAM_FILE_PATH, "path of the file to open").required()),
            Arc::new(OpenFileTool::new(sink)),
        )?
        .build())
}

/// Send one command, turning a channel failure into an error result
async fn forward(sink: &dyn CommandSink, command: &str, param: &str) -> Result<(), ToolResult> {
    match sink.send(&OutboundCommand::with_param(command, param)).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("Sending {} to IDE failed: {}", command, e);
            Err(ToolResult::error(format!(
                "Failed to send {} to IDE: {}",
                command, e
            )))
        }
    }
}

/// `open_content_in_editor`
pub struct OpenContentTool {
    sink: Arc<dyn CommandSink>,
}

impl OpenContentTool {
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl ToolHandler for OpenContentTool {
    async fn call(&self, args: ToolArgs) -> ToolResult {
        let content = args.str(PARAM_CONTENT).unwrap_or_default();
        if let Err(failed) = forward(self.sink.as_ref(), OPEN_EDITOR_COMMAND, content).await {
            return failed;
        }
        ToolResult::text("Opened editor for content.")
    }
}

/// `open_file_in_editor`
pub struct OpenFileTool {
    sink: Arc<dyn CommandSink>,
}

impl OpenFileTool {
    pub fn new(sink: Arc<dyn CommandSink>) -> Self {
        Self { sink }
    }
}

#[async_trait]
impl ToolHandler for OpenFileTool {
    async fn call(&self, args: ToolArgs) -> ToolResult {
        let path = args.str(PARAM_FILE_PATH).unwrap_or_default();
        if let Err(failed) = forward(self.sink.as_ref(), OPEN_FILE_COMMAND, path).await {
            return failed;
        }
        ToolResult::text(format!("Opened editor for {}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WireSeparator;
    use crate::error::Error;
    use crate::mcp::dispatch::{Dispatcher, ToolInvocation};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        sent: Mutex<Vec<OutboundCommand>>,
    }

    #[async_trait]
    impl CommandSink for RecordingSink {
        async fn send(&self, command: &OutboundCommand) -> crate::Result<()> {
            self.sent.lock().unwrap().push(command.clone());
            Ok(())
        }
    }

    struct RefusingSink;

    #[async_trait]
    impl CommandSink for RefusingSink {
        async fn send(&self, _command: &OutboundCommand) -> crate::Result<()> {
            Err(Error::EditorConnect {
                addr: "localhost:12345".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::ConnectionRefused),
            })
        }
    }

    fn dispatcher(sink: Arc<dyn CommandSink>) -> Dispatcher {
        Dispatcher::new(Arc::new(default_registry(sink).unwrap()))
    }

    #[test]
    fn test_tool_definitions_valid() {
        let registry = default_registry(Arc::new(RecordingSink::default())).unwrap();
        assert_eq!(registry.names(), vec![OPEN_CONTENT_TOOL, OPEN_FILE_TOOL]);

        for tool in registry.definitions() {
            assert!(!tool.description.is_empty(), "{} has empty description", tool.name);
            assert!(tool.input_schema.is_object(), "{} has invalid schema", tool.name);
        }
    }

    #[tokio::test]
    async fn test_open_content() {
        let sink = Arc::new(RecordingSink::default());
        let result = dispatcher(sink.clone())
            .dispatch(ToolInvocation::new(OPEN_CONTENT_TOOL, json!({"content": "print('x')"})))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("Opened editor for content."));

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].encode(WireSeparator::None), b"open_editorprint('x')");
    }

    #[tokio::test]
    async fn test_open_file() {
        let sink = Arc::new(RecordingSink::default());
        let result = dispatcher(sink.clone())
            .dispatch(ToolInvocation::new(OPEN_FILE_TOOL, json!({"filePath": "/tmp/a.go"})))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("Opened editor for /tmp/a.go"));

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].encode(WireSeparator::None), b"openFile/tmp/a.go");
    }

    #[tokio::test]
    async fn test_invalid_arguments_send_nothing() {
        let sink = Arc::new(RecordingSink::default());
        let dispatcher = dispatcher(sink.clone());

        // Wrong key for this tool
        let result = dispatcher
            .dispatch(ToolInvocation::new(OPEN_FILE_TOOL, json!({"content": "x"})))
            .await
            .unwrap();
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some("Invalid arguments format"));
        assert!(sink.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_channel_failure_is_error_result() {
        let result = dispatcher(Arc::new(RefusingSink))
            .dispatch(ToolInvocation::new(OPEN_CONTENT_TOOL, json!({"content": "hello"})))
            .await
            .unwrap();

        assert!(result.is_error);
        let text = result.first_text().unwrap();
        assert!(text.starts_with("Failed to send open_editor to IDE"));
        assert!(text.contains("localhost:12345"));
    }
}
