use crate::{
    client::Client,
    config::Config,
    error::CanvasError,
    types::{Course, Module, ModuleItem, Page},
};

/// Page size requested from every collection endpoint (Canvas maximum is 100)
pub const PER_PAGE: &str = "100";

/// API resource for the `/courses` family of endpoints
pub struct Courses<'c, C: Config> {
    client: &'c Client<C>,
}

impl<'c, C: Config> Courses<'c, C> {
    /// Creates a new Courses resource
    #[must_use]
    pub const fn new(client: &'c Client<C>) -> Self {
        Self { client }
    }

    /// List every course visible to the caller, across all pages.
    ///
    /// `params` are passed through verbatim (`enrollment_type`, `state[]`, `include[]`, ...).
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails or is not a list.
    pub async fn list(&self, params: &[(&str, &str)]) -> Result<Vec<Course>, CanvasError> {
        self.client.get_paginated("/courses", params).await
    }

    /// Fetch a single course by numeric ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Canvas reports an error.
    pub async fn get(&self, course_id: &str) -> Result<Course, CanvasError> {
        self.client.get(&format!("/courses/{course_id}"), &[]).await
    }

    /// List every wiki page of a course.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of results fails or is not a list.
    pub async fn pages(&self, course_id: &str) -> Result<Vec<Page>, CanvasError> {
        self.client
            .get_paginated(
                &format!("/courses/{course_id}/pages"),
                &[("per_page", PER_PAGE)],
            )
            .await
    }

    /// List every module of a course.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of results fails or is not a list.
    pub async fn modules(&self, course_id: &str) -> Result<Vec<Module>, CanvasError> {
        self.client
            .get_paginated(
                &format!("/courses/{course_id}/modules"),
                &[("per_page", PER_PAGE)],
            )
            .await
    }

    /// List every item of one module.
    ///
    /// # Errors
    ///
    /// Returns an error if any page of results fails or is not a list.
    pub async fn module_items(
        &self,
        course_id: &str,
        module_id: u64,
    ) -> Result<Vec<ModuleItem>, CanvasError> {
        self.client
            .get_paginated(
                &format!("/courses/{course_id}/modules/{module_id}/items"),
                &[("per_page", PER_PAGE)],
            )
            .await
    }
}

impl<C: Config> crate::Client<C> {
    /// Returns the Courses API resource
    #[must_use]
    pub const fn courses(&self) -> Courses<'_, C> {
        Courses::new(self)
    }
}
