//! Name-keyed tool registry for JSON dispatch.

use crate::tool::{TextFormat, Tool, ToolError};
use futures::future::BoxFuture;
use schemars::generate::SchemaSettings;
use schemars::transform::AddNullable;
use schemars::{JsonSchema, Schema};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Result of a JSON dispatch: the serialized output plus its text rendering.
#[derive(Debug, Clone)]
pub struct FormattedResult {
    pub data: Value,
    pub text: String,
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn input_schema(&self) -> Schema;

    /// Decode `args`, run the tool, and render its output.
    fn call_json(&self, args: Value) -> BoxFuture<'static, Result<FormattedResult, ToolError>>;
}

/// Input schema in the dialect MCP clients expect.
pub fn input_schema_for<T: JsonSchema>() -> Schema {
    SchemaSettings::draft2020_12()
        .with_transform(AddNullable::default())
        .into_generator()
        .into_root_schema_for::<T>()
}

struct Erased<T>(T);

impl<T: Tool> ErasedTool for Erased<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> Schema {
        input_schema_for::<T::Input>()
    }

    fn call_json(&self, args: Value) -> BoxFuture<'static, Result<FormattedResult, ToolError>> {
        let input: T::Input = match serde_json::from_value(args) {
            Ok(input) => input,
            Err(e) => return Box::pin(async move { Err(ToolError::invalid_input(e)) }),
        };
        let fut = self.0.call(input);
        Box::pin(async move {
            let out = fut.await?;
            let text = out.fmt_text();
            let data = serde_json::to_value(&out).map_err(ToolError::internal)?;
            Ok(FormattedResult { data, text })
        })
    }
}

/// Registry of tools, listed in name order.
#[derive(Default)]
pub struct ToolRegistry {
    map: BTreeMap<String, Arc<dyn ErasedTool>>,
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    pub fn list_names(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Dispatch a tool call using JSON arguments.
    pub async fn dispatch_json(
        &self,
        name: &str,
        args: Value,
    ) -> Result<FormattedResult, ToolError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| ToolError::invalid_input(format!("Unknown tool: {name}")))?;
        entry.call_json(args).await
    }
}

/// Builder for constructing a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    items: Vec<Arc<dyn ErasedTool>>,
}

impl ToolRegistryBuilder {
    #[must_use]
    pub fn register<T: Tool>(mut self, tool: T) -> Self {
        self.items.push(Arc::new(Erased(tool)));
        self
    }

    /// Later registrations under the same name replace earlier ones.
    pub fn finish(self) -> ToolRegistry {
        let map = self
            .items
            .into_iter()
            .map(|t| (t.name().to_string(), t))
            .collect();
        ToolRegistry { map }
    }
}
