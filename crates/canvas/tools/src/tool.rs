//! Tool trait, error type and text formatting shared by every course tool.

use crate::error::CourseError;
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Human-readable rendering of a tool output.
///
/// This is the text returned to MCP clients and printed by the CLI.
pub trait TextFormat {
    fn fmt_text(&self) -> String;
}

/// Error type returned by tool operations.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Arguments did not match the tool's input schema, or the tool is unknown.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Output could not be encoded.
    #[error("internal error: {0}")]
    Internal(String),

    /// The tool ran and reported a failure.
    #[error("{}", .0.message())]
    Course(#[from] CourseError),
}

impl ToolError {
    pub fn invalid_input<S: ToString>(s: S) -> Self {
        Self::InvalidInput(s.to_string())
    }

    pub fn internal<S: ToString>(s: S) -> Self {
        Self::Internal(s.to_string())
    }
}

/// A named, schema-described operation callable from MCP or natively.
pub trait Tool: Send + Sync + 'static {
    /// Wire input; its JSON schema is published to MCP clients.
    type Input: DeserializeOwned + JsonSchema + Send + 'static;

    type Output: Serialize + TextFormat + Send + 'static;

    const NAME: &'static str;

    const DESCRIPTION: &'static str;

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}
