#![deny(clippy::all)]
#![deny(missing_docs)]

//! Async Canvas LMS REST client.

/// HTTP client implementation
pub mod client;
/// Configuration types for the client
pub mod config;
/// Error types
pub mod error;
/// `Link` header parsing for paginated collections
pub mod pagination;
/// Course-scoped API resources
pub mod resources;
/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;
/// Course, page and module records
pub mod types;

pub use crate::client::Client;
pub use crate::config::CanvasConfig;
pub use crate::error::CanvasError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::types::*;
    pub use crate::{CanvasConfig, CanvasError, Client};
}
