pub mod cache;
pub mod dates;
pub mod error;
pub mod identifier;
pub mod models;
pub mod registry;
pub mod server;
pub mod tool;
pub mod tools;

/// Test support utilities (for use in tests)
#[doc(hidden)]
pub mod test_support;

use cache::CourseCache;
use canvas_async::{CanvasConfig, Client};
use identifier::{IdentifierArg, resolve_course_code, resolve_course_id, validate_course_identifier};
use models::{
    ContentOverview, CourseDetails, CourseList, CourseSummary, MODULES_ANALYZED, ModulesSummary,
    summarize_pages,
};
use std::sync::Arc;
use tool::TextFormat;
use tracing::{info, warn};

pub use error::CourseError;
pub use server::CanvasServer;
pub use tools::build_registry;

/// Course tools over one Canvas client and one identifier cache.
pub struct CanvasTools {
    client: Client<CanvasConfig>,
    cache: Arc<CourseCache>,
}

impl Default for CanvasTools {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTools {
    /// Reads `CANVAS_API_TOKEN` and `CANVAS_API_URL` from the environment.
    pub fn new() -> Self {
        Self::with_config(CanvasConfig::new())
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        Self::with_cache(config, Arc::new(CourseCache::new()))
    }

    /// Share an existing cache, e.g. one pre-seeded in tests.
    pub fn with_cache(config: CanvasConfig, cache: Arc<CourseCache>) -> Self {
        Self {
            client: Client::with_config(config),
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<CourseCache> {
        &self.cache
    }

    /// List the caller's courses.
    ///
    /// By default only available courses the caller teaches are returned.
    pub async fn fetch_courses(
        &self,
        include_concluded: bool,
        include_all: bool,
    ) -> Result<CourseList, CourseError> {
        let mut params = vec![
            ("include[]", "term"),
            ("include[]", "teachers"),
            ("include[]", "total_students"),
            ("per_page", canvas_async::resources::PER_PAGE),
        ];
        if !include_all {
            params.push(("enrollment_type", "teacher"));
        }
        params.push(("state[]", "available"));
        if include_concluded {
            params.push(("state[]", "completed"));
        }

        info!(include_concluded, include_all, "listing courses");
        let courses = self
            .client
            .courses()
            .list(&params)
            .await
            .map_err(CourseError::remote("courses"))?;
        self.cache.refresh_from(&courses);

        Ok(CourseList {
            courses: courses.iter().map(CourseSummary::from).collect(),
        })
    }

    /// Fetch one course's settings.
    pub async fn course_details(&self, arg: &IdentifierArg) -> Result<CourseDetails, CourseError> {
        let identifier = validate_course_identifier(arg)?;
        let course_id = resolve_course_id(&self.client, &self.cache, &identifier).await?;

        info!(course_id = %course_id, "fetching course details");
        let course = self
            .client
            .courses()
            .get(&course_id)
            .await
            .map_err(CourseError::remote("course details"))?;
        self.cache.refresh_one(&course);

        Ok(CourseDetails::from_course(course, identifier.as_str()))
    }

    /// Summarize a course's pages and modules.
    ///
    /// Each section is best effort: a section whose fetch fails is left out,
    /// and modules whose items cannot be listed are skipped in the totals.
    pub async fn content_overview(
        &self,
        arg: &IdentifierArg,
        include_pages: bool,
        include_modules: bool,
    ) -> Result<ContentOverview, CourseError> {
        let identifier = validate_course_identifier(arg)?;
        let course_id = resolve_course_id(&self.client, &self.cache, &identifier).await?;
        let courses = self.client.courses();

        info!(course_id = %course_id, include_pages, include_modules, "building content overview");

        let course_name = match courses.get(&course_id).await {
            Ok(course) => {
                self.cache.refresh_one(&course);
                Some(course.name.unwrap_or_else(|| "Unknown Course".to_string()))
            }
            Err(e) => {
                warn!(course_id = %course_id, error = %e, "course fetch failed; omitting name");
                None
            }
        };

        let pages = if include_pages {
            match courses.pages(&course_id).await {
                Ok(pages) => Some(summarize_pages(&pages)),
                Err(e) => {
                    warn!(course_id = %course_id, error = %e, "page listing failed; omitting pages");
                    None
                }
            }
        } else {
            None
        };

        let modules = if include_modules {
            match courses.modules(&course_id).await {
                Ok(modules) => {
                    let mut summary = ModulesSummary::new(&modules);
                    for module in modules.iter().take(MODULES_ANALYZED) {
                        let Some(module_id) = module.id else {
                            continue;
                        };
                        match courses.module_items(&course_id, module_id).await {
                            Ok(items) => summary.add_items(&items),
                            Err(e) => {
                                warn!(module_id, error = %e, "module item listing failed; skipping");
                            }
                        }
                    }
                    Some(summary)
                }
                Err(e) => {
                    warn!(course_id = %course_id, error = %e, "module listing failed; omitting modules");
                    None
                }
            }
        } else {
            None
        };

        let display = resolve_course_code(&self.client, &self.cache, &course_id).await;

        Ok(ContentOverview {
            display,
            course_name,
            pages,
            modules,
        })
    }

    /// `list_courses` tool: formatted course list or an error string.
    pub async fn list_courses(&self, include_concluded: bool, include_all: bool) -> String {
        render(self.fetch_courses(include_concluded, include_all).await)
    }

    /// `get_course_details` tool: formatted details or an error string.
    pub async fn get_course_details(&self, course_identifier: impl Into<IdentifierArg>) -> String {
        render(self.course_details(&course_identifier.into()).await)
    }

    /// `get_course_content_overview` tool: formatted overview or an error string.
    pub async fn get_course_content_overview(
        &self,
        course_identifier: impl Into<IdentifierArg>,
        include_pages: bool,
        include_modules: bool,
    ) -> String {
        render(
            self.content_overview(&course_identifier.into(), include_pages, include_modules)
                .await,
        )
    }
}

fn render<T: TextFormat>(result: Result<T, CourseError>) -> String {
    match result {
        Ok(v) => v.fmt_text(),
        Err(e) => e.message(),
    }
}
