//! MCP server handler backed by a [`ToolRegistry`].

use crate::registry::ToolRegistry;
use crate::tool::ToolError;
use rmcp::model as m;
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Serves the registry's tools over MCP.
///
/// An optional allowlist hides every tool not named in it, from both
/// `list_tools` and `call_tool`.
pub struct CanvasServer {
    registry: Arc<ToolRegistry>,
    allowlist: Option<HashSet<String>>,
    name: String,
    version: String,
}

impl CanvasServer {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            allowlist: None,
            name: "canvas-tools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    #[must_use]
    pub fn with_allowlist(mut self, allowlist: impl IntoIterator<Item = String>) -> Self {
        self.allowlist = Some(allowlist.into_iter().collect());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Tool names visible to clients, in name order.
    pub fn effective_tool_names(&self) -> Vec<String> {
        self.registry
            .list_names()
            .into_iter()
            .filter(|n| self.is_allowed(n))
            .collect()
    }

    fn is_allowed(&self, name: &str) -> bool {
        self.allowlist.as_ref().is_none_or(|set| set.contains(name))
    }

    fn tool_descriptors(&self) -> Vec<m::Tool> {
        self.effective_tool_names()
            .into_iter()
            .filter_map(|name| {
                let erased = self.registry.get(&name)?;
                let schema = serde_json::to_value(erased.input_schema())
                    .ok()
                    .and_then(|v| v.as_object().cloned())
                    .unwrap_or_default();
                Some(m::Tool {
                    name: name.clone().into(),
                    title: Some(name),
                    description: Some(erased.description().to_string().into()),
                    input_schema: Arc::new(schema),
                    annotations: None,
                    output_schema: None,
                    icons: None,
                    meta: None,
                })
            })
            .collect()
    }

    /// Run one tool call and wrap the outcome as MCP content.
    pub async fn run_tool(&self, name: &str, args: serde_json::Value) -> m::CallToolResult {
        if !self.is_allowed(name) {
            return m::CallToolResult::error(vec![m::Content::text(format!(
                "Tool '{name}' not enabled on this server"
            ))]);
        }

        info!(tool = name, "tool call");
        match self.registry.dispatch_json(name, args).await {
            Ok(res) => m::CallToolResult::success(vec![m::Content::text(res.text)]),
            // Course failures are ordinary tool answers, same as the string handlers.
            Err(ToolError::Course(e)) => {
                m::CallToolResult::success(vec![m::Content::text(e.message())])
            }
            Err(e) => m::CallToolResult::error(vec![m::Content::text(e.to_string())]),
        }
    }
}

// The trait signatures return `impl Future`
#[allow(clippy::manual_async_fn)]
impl ServerHandler for CanvasServer {
    fn initialize(
        &self,
        _params: m::InitializeRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::InitializeResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::InitializeResult {
                server_info: m::Implementation {
                    name: self.name.clone(),
                    title: Some(self.name.clone()),
                    version: self.version.clone(),
                    website_url: None,
                    icons: None,
                },
                capabilities: m::ServerCapabilities::builder().enable_tools().build(),
                ..Default::default()
            })
        }
    }

    fn list_tools(
        &self,
        _req: Option<m::PaginatedRequestParam>,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::ListToolsResult, m::ErrorData>> + Send + '_
    {
        async move {
            Ok(m::ListToolsResult {
                tools: self.tool_descriptors(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        req: m::CallToolRequestParam,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<m::CallToolResult, m::ErrorData>> + Send + '_
    {
        async move {
            let args = serde_json::Value::Object(req.arguments.unwrap_or_default());
            Ok(self.run_tool(&req.name, args).await)
        }
    }

    fn ping(
        &self,
        _ctx: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = Result<(), m::ErrorData>> + Send + '_ {
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CourseError;
    use crate::tool::{TextFormat, Tool};
    use futures::future::BoxFuture;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Deserialize, JsonSchema)]
    struct NoInput {}

    #[derive(Serialize)]
    struct Fixed;

    impl TextFormat for Fixed {
        fn fmt_text(&self) -> String {
            "fixed".into()
        }
    }

    struct ToolA;
    struct ToolB;

    impl Tool for ToolA {
        type Input = NoInput;
        type Output = Fixed;
        const NAME: &'static str = "tool_a";
        const DESCRIPTION: &'static str = "A";

        fn call(&self, _input: NoInput) -> BoxFuture<'static, Result<Fixed, ToolError>> {
            Box::pin(async { Ok(Fixed) })
        }
    }

    impl Tool for ToolB {
        type Input = NoInput;
        type Output = Fixed;
        const NAME: &'static str = "tool_b";
        const DESCRIPTION: &'static str = "B";

        fn call(&self, _input: NoInput) -> BoxFuture<'static, Result<Fixed, ToolError>> {
            Box::pin(async { Err(ToolError::internal("boom")) })
        }
    }

    struct ToolC;

    impl Tool for ToolC {
        type Input = NoInput;
        type Output = Fixed;
        const NAME: &'static str = "tool_c";
        const DESCRIPTION: &'static str = "C";

        fn call(&self, _input: NoInput) -> BoxFuture<'static, Result<Fixed, ToolError>> {
            Box::pin(async { Err(CourseError::NotFound("badm_999".into()).into()) })
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        Arc::new(
            ToolRegistry::builder()
                .register(ToolA)
                .register(ToolB)
                .register(ToolC)
                .finish(),
        )
    }

    fn text_of(res: &m::CallToolResult) -> String {
        res.content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap_or_default()
    }

    #[test]
    fn allowlist_filters_names() {
        let server = CanvasServer::new(registry()).with_allowlist(["tool_a".to_string()]);
        assert_eq!(server.effective_tool_names(), vec!["tool_a".to_string()]);
    }

    #[test]
    fn descriptors_carry_schema_and_description() {
        let server = CanvasServer::new(registry());
        let tools = server.tool_descriptors();
        assert_eq!(tools.len(), 3);
        assert_eq!(tools[0].name, "tool_a");
        assert_eq!(tools[0].input_schema.get("type"), Some(&serde_json::json!("object")));
    }

    #[tokio::test]
    async fn run_tool_success_and_failure() {
        let server = CanvasServer::new(registry());

        let ok = server.run_tool("tool_a", serde_json::json!({})).await;
        assert_eq!(ok.is_error, Some(false));
        assert_eq!(text_of(&ok), "fixed");

        let err = server.run_tool("tool_b", serde_json::json!({})).await;
        assert_eq!(err.is_error, Some(true));
        assert_eq!(text_of(&err), "internal error: boom");
    }

    #[tokio::test]
    async fn course_errors_are_plain_answers() {
        let server = CanvasServer::new(registry());
        let res = server.run_tool("tool_c", serde_json::json!({})).await;
        assert_eq!(res.is_error, Some(false));
        assert_eq!(text_of(&res), "Error: Course not found: badm_999");
    }

    #[tokio::test]
    async fn run_tool_respects_allowlist() {
        let server = CanvasServer::new(registry()).with_allowlist(["tool_a".to_string()]);
        let res = server.run_tool("tool_b", serde_json::json!({})).await;
        assert_eq!(res.is_error, Some(true));
        assert!(text_of(&res).contains("not enabled"));
    }
}
