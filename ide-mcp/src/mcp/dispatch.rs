//! Tool call dispatch

use super::args::{extract_arguments, INVALID_ARGUMENTS};
use super::protocol::ToolResult;
use super::registry::ToolRegistry;
use crate::error::{Error, Result};
use serde_json::Value;
use std::sync::Arc;

/// An inbound `tools/call`
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub tool_name: String,
    pub arguments: Value,
}

impl ToolInvocation {
    pub fn new(tool_name: impl Into<String>, arguments: Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
        }
    }
}

/// Routes invocations to registered handlers
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Validate the invocation's arguments and run the tool's handler.
    ///
    /// Bad arguments yield an `isError` result without calling the handler.
    /// An unknown tool name is an `Err`, left for the transport to report.
    pub async fn dispatch(&self, invocation: ToolInvocation) -> Result<ToolResult> {
        let tool = self
            .registry
            .get(&invocation.tool_name)
            .ok_or_else(|| Error::UnknownTool(invocation.tool_name.clone()))?;

        tracing::debug!("Dispatching {}", invocation.tool_name);

        let args = match extract_arguments(&tool.descriptor.params, &invocation.arguments) {
            Ok(args) => args,
            Err(e) => {
                tracing::warn!("Rejected {} call: {}", invocation.tool_name, e);
                return Ok(ToolResult::error(INVALID_ARGUMENTS));
            }
        };

        Ok(tool.handler.call(args).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::args::ToolArgs;
    use crate::mcp::registry::{ParamSpec, ToolDescriptor, ToolHandler};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and echoes the `content` argument
    #[derive(Default)]
    struct Spy {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ToolHandler for Spy {
        async fn call(&self, args: ToolArgs) -> ToolResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ToolResult::text(format!("got {}", args.str("content").unwrap_or("?")))
        }
    }

    fn dispatcher_with_spy() -> (Dispatcher, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let registry = ToolRegistry::builder()
            .register(
                ToolDescriptor::new("spy", "Records calls")
                    .param(ParamSpec::string("content", "anything").required()),
                spy.clone(),
            )
            .unwrap()
            .build();
        (Dispatcher::new(Arc::new(registry)), spy)
    }

    fn assert_invalid(result: &ToolResult) {
        assert!(result.is_error);
        assert_eq!(result.first_text(), Some(INVALID_ARGUMENTS));
    }

    #[tokio::test]
    async fn test_dispatch_valid_call() {
        let (dispatcher, spy) = dispatcher_with_spy();
        let result = dispatcher
            .dispatch(ToolInvocation::new("spy", json!({"content": "hello"})))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.first_text(), Some("got hello"));
        assert_eq!(spy.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dispatch_missing_required() {
        let (dispatcher, spy) = dispatcher_with_spy();
        for args in [json!({}), json!(null), json!({"other": "x"})] {
            let result = dispatcher
                .dispatch(ToolInvocation::new("spy", args))
                .await
                .unwrap();
            assert_invalid(&result);
        }
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_malformed_arguments() {
        let (dispatcher, spy) = dispatcher_with_spy();
        let bad = [
            json!("content"),
            json!(["content", "hello"]),
            json!({"content": 42}),
            json!({"content": {"nested": "hello"}}),
        ];
        for args in bad {
            let result = dispatcher
                .dispatch(ToolInvocation::new("spy", args))
                .await
                .unwrap();
            assert_invalid(&result);
        }
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dispatch_unknown_tool() {
        let (dispatcher, spy) = dispatcher_with_spy();
        let err = dispatcher
            .dispatch(ToolInvocation::new("nope", json!({})))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnknownTool(ref name) if name == "nope"));
        assert_eq!(spy.calls.load(Ordering::SeqCst), 0);
    }
}
