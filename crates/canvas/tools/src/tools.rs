//! Tool wrappers exposing [`CanvasTools`] through the registry.
//!
//! Each tool delegates to the corresponding method on [`CanvasTools`].

use crate::CanvasTools;
use crate::identifier::IdentifierArg;
use crate::models::{ContentOverview, CourseDetails, CourseList};
use crate::registry::ToolRegistry;
use crate::tool::{Tool, ToolError};
use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

const fn default_true() -> bool {
    true
}

// ============================================================================
// ListCourses Tool
// ============================================================================

/// Input for list_courses tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListCoursesInput {
    /// Also list concluded (completed) courses
    #[serde(default)]
    pub include_concluded: bool,
    /// List every enrollment, not only courses the caller teaches
    #[serde(default)]
    pub include_all: bool,
}

#[derive(Clone)]
pub struct ListCoursesTool {
    canvas: Arc<CanvasTools>,
}

impl ListCoursesTool {
    pub fn new(canvas: Arc<CanvasTools>) -> Self {
        Self { canvas }
    }
}

impl Tool for ListCoursesTool {
    type Input = ListCoursesInput;
    type Output = CourseList;
    const NAME: &'static str = "list_courses";
    const DESCRIPTION: &'static str = "List courses for the authenticated user";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let canvas = Arc::clone(&self.canvas);
        Box::pin(async move {
            Ok(canvas
                .fetch_courses(input.include_concluded, input.include_all)
                .await?)
        })
    }
}

// ============================================================================
// GetCourseDetails Tool
// ============================================================================

/// Input for get_course_details tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseDetailsInput {
    /// Canvas course code (e.g. badm_554_120251_246794) or numeric course ID
    pub course_identifier: IdentifierArg,
}

#[derive(Clone)]
pub struct GetCourseDetailsTool {
    canvas: Arc<CanvasTools>,
}

impl GetCourseDetailsTool {
    pub fn new(canvas: Arc<CanvasTools>) -> Self {
        Self { canvas }
    }
}

impl Tool for GetCourseDetailsTool {
    type Input = GetCourseDetailsInput;
    type Output = CourseDetails;
    const NAME: &'static str = "get_course_details";
    const DESCRIPTION: &'static str =
        "Get detailed information about a course by course code or ID";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let canvas = Arc::clone(&self.canvas);
        Box::pin(async move { Ok(canvas.course_details(&input.course_identifier).await?) })
    }
}

// ============================================================================
// GetCourseContentOverview Tool
// ============================================================================

/// Input for get_course_content_overview tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetCourseContentOverviewInput {
    /// Canvas course code (e.g. badm_554_120251_246794) or numeric course ID
    pub course_identifier: IdentifierArg,
    /// Summarize wiki pages (default: true)
    #[serde(default = "default_true")]
    pub include_pages: bool,
    /// Summarize modules and their items (default: true)
    #[serde(default = "default_true")]
    pub include_modules: bool,
}

#[derive(Clone)]
pub struct GetCourseContentOverviewTool {
    canvas: Arc<CanvasTools>,
}

impl GetCourseContentOverviewTool {
    pub fn new(canvas: Arc<CanvasTools>) -> Self {
        Self { canvas }
    }
}

impl Tool for GetCourseContentOverviewTool {
    type Input = GetCourseContentOverviewInput;
    type Output = ContentOverview;
    const NAME: &'static str = "get_course_content_overview";
    const DESCRIPTION: &'static str =
        "Summarize a course's pages and modules, by course code or ID";

    fn call(&self, input: Self::Input) -> BoxFuture<'static, Result<Self::Output, ToolError>> {
        let canvas = Arc::clone(&self.canvas);
        Box::pin(async move {
            Ok(canvas
                .content_overview(
                    &input.course_identifier,
                    input.include_pages,
                    input.include_modules,
                )
                .await?)
        })
    }
}

// ============================================================================
// Registry builder
// ============================================================================

/// Build a ToolRegistry containing all Canvas course tools.
pub fn build_registry(canvas: Arc<CanvasTools>) -> ToolRegistry {
    ToolRegistry::builder()
        .register(ListCoursesTool::new(Arc::clone(&canvas)))
        .register(GetCourseDetailsTool::new(Arc::clone(&canvas)))
        .register(GetCourseContentOverviewTool::new(canvas))
        .finish()
}
