//! Fixtures for tests that drive [`CanvasTools`](crate::CanvasTools) against a mock Canvas.
//!
//! # Usage
//!
//! ```rust,ignore
//! use canvas_tools::test_support::*;
//!
//! let server = wiremock::MockServer::start().await;
//! let tools = tools_for(&server.uri());
//! ```

use crate::CanvasTools;
use crate::cache::CourseCache;
use canvas_async::CanvasConfig;
use serde_json::{Value, json};
use std::sync::Arc;

pub use canvas_async::test_support::EnvGuard;

/// Token sent by every client built here.
pub const TEST_TOKEN: &str = "test-token";

pub fn config_for(base: &str) -> CanvasConfig {
    CanvasConfig::new()
        .with_api_base(base)
        .with_api_token(TEST_TOKEN)
}

pub fn tools_for(base: &str) -> CanvasTools {
    CanvasTools::with_config(config_for(base))
}

/// Tools sharing `cache`, so tests can seed it or inspect it afterwards.
pub fn tools_with_cache(base: &str, cache: Arc<CourseCache>) -> CanvasTools {
    CanvasTools::with_cache(config_for(base), cache)
}

pub fn course_node(id: u64, code: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "course_code": code,
        "workflow_state": "available",
        "start_at": null,
        "end_at": null,
        "time_zone": "America/Chicago",
        "default_view": "modules",
        "is_public": false,
        "blueprint": false
    })
}

pub fn page_node(title: &str, published: bool, updated_at: &str) -> Value {
    json!({
        "title": title,
        "url": title.to_lowercase().replace(' ', "-"),
        "published": published,
        "front_page": false,
        "updated_at": updated_at
    })
}

pub fn module_node(id: u64, name: &str, state: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "state": state,
        "position": id,
        "items_count": 0
    })
}

pub fn item_node(id: u64, title: &str, kind: &str) -> Value {
    json!({"id": id, "title": title, "type": kind})
}

/// `Link` header value advertising `next` as the following page.
pub fn next_link(next: &str) -> String {
    format!("<{next}>; rel=\"next\"")
}
