use canvas_async::CanvasError;
use thiserror::Error;

/// Failure of a course tool.
#[derive(Debug, Error)]
pub enum CourseError {
    /// The caller's input was rejected before any request was made.
    #[error("{0}")]
    InvalidInput(String),

    /// A course code did not match any course visible to the caller.
    #[error("Course not found: {0}")]
    NotFound(String),

    /// Canvas rejected a request or returned something unusable.
    #[error("Error fetching {what}: {source}")]
    Remote {
        what: &'static str,
        source: CanvasError,
    },
}

impl CourseError {
    /// Adapter for `map_err` that labels a Canvas failure with what was being fetched.
    pub fn remote(what: &'static str) -> impl FnOnce(CanvasError) -> Self {
        move |source| Self::Remote { what, source }
    }

    /// The string handed back to tool callers.
    ///
    /// Remote failures already carry their context; everything else gets a
    /// plain `Error:` prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Remote { .. } => self.to_string(),
            Self::InvalidInput(_) | Self::NotFound(_) => format!("Error: {self}"),
        }
    }
}
