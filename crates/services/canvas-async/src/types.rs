//! Loosely typed Canvas records.
//!
//! Every field is optional: Canvas omits or nulls fields depending on the
//! caller's role and the `include[]` parameters, and consumers render defaults
//! instead of failing.

use serde::{Deserialize, Serialize};

/// A course as returned by `/courses` and `/courses/:id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Course {
    /// Numeric course ID
    pub id: Option<u64>,
    /// Display name
    pub name: Option<String>,
    /// Human-readable course code (term/section slug)
    pub course_code: Option<String>,
    /// Start timestamp (ISO 8601)
    pub start_at: Option<String>,
    /// End timestamp (ISO 8601)
    pub end_at: Option<String>,
    /// IANA time zone name
    pub time_zone: Option<String>,
    /// Landing view for the course home
    pub default_view: Option<String>,
    /// Whether the course is public
    pub is_public: Option<bool>,
    /// Whether the course is a blueprint
    pub blueprint: Option<bool>,
    /// Workflow state (`available`, `completed`, ...)
    pub workflow_state: Option<String>,
}

impl Course {
    /// The ID rendered as a string, if present
    #[must_use]
    pub fn id_string(&self) -> Option<String> {
        self.id.map(|id| id.to_string())
    }
}

/// A wiki page from `/courses/:id/pages`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Page {
    /// Page title
    pub title: Option<String>,
    /// URL slug
    pub url: Option<String>,
    /// Whether the page is published
    pub published: Option<bool>,
    /// Whether the page is the course front page
    pub front_page: Option<bool>,
    /// Last update timestamp (ISO 8601)
    pub updated_at: Option<String>,
}

/// A module from `/courses/:id/modules`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Module {
    /// Numeric module ID
    pub id: Option<u64>,
    /// Module name
    pub name: Option<String>,
    /// Completion state for the caller (`active`, `locked`, ...)
    pub state: Option<String>,
    /// Position within the course
    pub position: Option<u64>,
    /// Number of items in the module
    pub items_count: Option<u64>,
}

/// An item from `/courses/:id/modules/:module_id/items`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleItem {
    /// Numeric item ID
    pub id: Option<u64>,
    /// Item title
    pub title: Option<String>,
    /// Item type (`Page`, `Assignment`, `File`, ...)
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}
