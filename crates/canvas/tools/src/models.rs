use crate::dates::format_date;
use crate::tool::TextFormat;
use canvas_async::types::{Course, Module, ModuleItem, Page};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of published pages listed in an overview.
pub const RECENT_PAGES: usize = 5;
/// Modules whose items are enumerated in an overview.
pub const MODULES_ANALYZED: usize = 10;
/// Modules listed under "Module Structure".
pub const MODULES_LISTED: usize = 3;

fn py_bool(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

fn or_na(s: Option<&str>) -> &str {
    s.unwrap_or("N/A")
}

// ============================================================================
// Course list
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourseSummary {
    pub id: Option<u64>,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl From<&Course> for CourseSummary {
    fn from(c: &Course) -> Self {
        Self {
            id: c.id,
            code: c.course_code.clone(),
            name: c.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourseList {
    pub courses: Vec<CourseSummary>,
}

impl TextFormat for CourseList {
    fn fmt_text(&self) -> String {
        if self.courses.is_empty() {
            return "No courses found.".to_string();
        }
        let blocks: Vec<String> = self
            .courses
            .iter()
            .map(|c| {
                let id = c.id.map_or_else(|| "N/A".to_string(), |id| id.to_string());
                format!(
                    "Code: {}\nName: {}\nID: {id}\n",
                    c.code.as_deref().unwrap_or("No code"),
                    c.name.as_deref().unwrap_or("Unnamed course"),
                )
            })
            .collect();
        format!("Courses:\n\n{}", blocks.join("\n"))
    }
}

// ============================================================================
// Course details
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CourseDetails {
    /// Course code when known, otherwise the identifier the caller gave.
    pub display: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
    pub time_zone: Option<String>,
    pub default_view: Option<String>,
    pub is_public: bool,
    pub blueprint: bool,
}

impl CourseDetails {
    pub fn from_course(course: Course, requested: &str) -> Self {
        Self {
            display: course
                .course_code
                .clone()
                .unwrap_or_else(|| requested.to_string()),
            code: course.course_code,
            name: course.name,
            start_at: course.start_at,
            end_at: course.end_at,
            time_zone: course.time_zone,
            default_view: course.default_view,
            is_public: course.is_public.unwrap_or(false),
            blueprint: course.blueprint.unwrap_or(false),
        }
    }
}

impl TextFormat for CourseDetails {
    fn fmt_text(&self) -> String {
        let lines = [
            format!("Code: {}", or_na(self.code.as_deref())),
            format!("Name: {}", or_na(self.name.as_deref())),
            format!("Start Date: {}", format_date(self.start_at.as_deref())),
            format!("End Date: {}", format_date(self.end_at.as_deref())),
            format!("Time Zone: {}", or_na(self.time_zone.as_deref())),
            format!("Default View: {}", or_na(self.default_view.as_deref())),
            format!("Public: {}", py_bool(self.is_public)),
            format!("Blueprint: {}", py_bool(self.blueprint)),
        ];
        format!("Course Details for {}:\n\n{}", self.display, lines.join("\n"))
    }
}

// ============================================================================
// Content overview
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PageRef {
    pub title: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PagesSummary {
    pub total: usize,
    pub published: usize,
    pub unpublished: usize,
    pub front_pages: usize,
    /// Most recently updated published pages, newest first.
    pub recent: Vec<PageRef>,
}

/// Count pages by status and pick the most recently updated published ones.
///
/// Pages without `updated_at` sort last; ties keep server order.
pub fn summarize_pages(pages: &[Page]) -> PagesSummary {
    let mut published: Vec<&Page> = pages
        .iter()
        .filter(|p| p.published.unwrap_or(false))
        .collect();
    let front_pages = pages
        .iter()
        .filter(|p| p.front_page.unwrap_or(false))
        .count();

    let published_count = published.len();

    published.sort_by(|a, b| {
        let a = a.updated_at.as_deref().unwrap_or("");
        let b = b.updated_at.as_deref().unwrap_or("");
        b.cmp(a)
    });

    PagesSummary {
        total: pages.len(),
        published: published_count,
        unpublished: pages.len() - published_count,
        front_pages,
        recent: published
            .into_iter()
            .take(RECENT_PAGES)
            .map(|p| PageRef {
                title: p.title.clone(),
                updated_at: p.updated_at.clone(),
            })
            .collect(),
    }
}

impl TextFormat for PagesSummary {
    fn fmt_text(&self) -> String {
        let mut lines = vec![
            "\nPages Summary:".to_string(),
            format!("  Total Pages: {}", self.total),
            format!("  Published: {}", self.published),
            format!("  Unpublished: {}", self.unpublished),
            format!("  Front Pages: {}", self.front_pages),
        ];
        if !self.recent.is_empty() {
            lines.push("\nRecent Published Pages:".to_string());
            for page in &self.recent {
                lines.push(format!(
                    "    {} (Updated: {})",
                    page.title.as_deref().unwrap_or("Untitled"),
                    format_date(page.updated_at.as_deref())
                ));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModuleRef {
    pub name: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModulesSummary {
    pub total_modules: usize,
    /// Items counted across the analyzed modules.
    pub items_analyzed: usize,
    /// Item counts keyed by type, alphabetical.
    pub item_types: BTreeMap<String, usize>,
    /// The first few modules in course order.
    pub structure: Vec<ModuleRef>,
}

impl ModulesSummary {
    pub fn new(modules: &[Module]) -> Self {
        Self {
            total_modules: modules.len(),
            structure: modules
                .iter()
                .take(MODULES_LISTED)
                .map(|m| ModuleRef {
                    name: m.name.clone(),
                    state: m.state.clone(),
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Fold one module's items into the totals.
    pub fn add_items(&mut self, items: &[ModuleItem]) {
        self.items_analyzed += items.len();
        for item in items {
            let kind = item.item_type.as_deref().unwrap_or("Unknown");
            *self.item_types.entry(kind.to_string()).or_default() += 1;
        }
    }
}

impl TextFormat for ModulesSummary {
    fn fmt_text(&self) -> String {
        let mut lines = vec![
            "\nModules Summary:".to_string(),
            format!("  Total Modules: {}", self.total_modules),
            format!("  Total Items Analyzed: {}", self.items_analyzed),
        ];
        if !self.item_types.is_empty() {
            lines.push("  Item Types:".to_string());
            for (kind, count) in &self.item_types {
                lines.push(format!("    {kind}: {count}"));
            }
        }
        if !self.structure.is_empty() {
            lines.push(format!("\nModule Structure (first {MODULES_LISTED}):"));
            for module in &self.structure {
                lines.push(format!(
                    "    {} (Status: {})",
                    module.name.as_deref().unwrap_or("Unnamed"),
                    module.state.as_deref().unwrap_or("unknown")
                ));
            }
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentOverview {
    /// Course code when resolvable, otherwise the course ID.
    pub display: String,
    /// Present when the course record itself could be fetched.
    pub course_name: Option<String>,
    pub pages: Option<PagesSummary>,
    pub modules: Option<ModulesSummary>,
}

impl TextFormat for ContentOverview {
    fn fmt_text(&self) -> String {
        let mut sections = Vec::new();
        if let Some(name) = &self.course_name {
            sections.push(format!("Course: {name}"));
        }
        if let Some(pages) = &self.pages {
            sections.push(pages.fmt_text());
        }
        if let Some(modules) = &self.modules {
            sections.push(modules.fmt_text());
        }
        format!(
            "Content Overview for Course {}:\n{}",
            self.display,
            sections.join("\n")
        )
    }
}
