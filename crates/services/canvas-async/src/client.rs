use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::Config,
    error::{CanvasError, deserialize_api_error, map_deser, server_message},
    pagination,
};

/// `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("canvas-async/", env!("CARGO_PKG_VERSION"));

/// Canvas API client
///
/// The client is generic over a [`Config`] implementation that provides authentication
/// and API configuration.
#[derive(Debug, Clone)]
pub struct Client<C: Config> {
    http: reqwest::Client,
    config: C,
}

impl Client<crate::config::CanvasConfig> {
    /// Creates a new client with default configuration
    ///
    /// Uses environment variables for authentication:
    /// - `CANVAS_API_TOKEN` for bearer authentication
    /// - `CANVAS_API_URL` for the API base URL
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(crate::config::CanvasConfig::new())
    }
}

impl<C: Config + Default> Default for Client<C> {
    fn default() -> Self {
        Self::with_config(C::default())
    }
}

/// One response body plus the advertised next page.
struct RawPage {
    body: bytes::Bytes,
    next: Option<String>,
}

impl<C: Config> Client<C> {
    /// Creates a new client with the given configuration.
    #[must_use]
    pub fn with_config(config: C) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(60))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP client build failed; using reqwest defaults without timeouts");
                reqwest::Client::default()
            });
        Self { http, config }
    }

    /// Replaces the HTTP client with a custom one
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Returns a reference to the client's configuration
    #[must_use]
    pub const fn config(&self) -> &C {
        &self.config
    }

    /// Issues a single GET and deserializes the body.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, Canvas
    /// answers with an error status, or the body does not deserialize into `T`.
    pub async fn get<T>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, CanvasError>
    where
        T: DeserializeOwned,
    {
        self.config.validate_auth()?;
        let page = self.fetch(&self.config.url(path), params).await?;
        serde_json::from_slice(&page.body).map_err(|e| map_deser(&e, &page.body))
    }

    /// Fetches every page of a collection endpoint and concatenates the records.
    ///
    /// Follows `rel="next"` links until none remain. Records keep the order in
    /// which the server delivered them. An empty first page yields an empty `Vec`.
    ///
    /// # Errors
    ///
    /// Returns an error if any page fails, or if a page body is not a JSON array
    /// (carrying the server-reported message when the body has one).
    pub async fn get_paginated<T>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>, CanvasError>
    where
        T: DeserializeOwned,
    {
        self.config.validate_auth()?;

        let first_url = self.config.url(path);
        let mut records = Vec::new();
        let mut page = self.fetch(&first_url, params).await?;
        let mut page_no = 1usize;
        loop {
            let batch: Vec<T> = decode_page(path, &page.body)?;
            debug!(path, page = page_no, records = batch.len(), "fetched page");
            records.extend(batch);

            let Some(next) = page.next.take() else {
                break;
            };
            if !pagination::same_origin(&first_url, &next) {
                warn!(path, next = %next, "next page link leaves the API origin");
                return Err(CanvasError::UnexpectedShape {
                    path: path.to_string(),
                    message: format!("next page link points to another origin: {next}"),
                });
            }
            page = self.fetch(&next, &[]).await?;
            page_no += 1;
        }
        Ok(records)
    }

    async fn fetch(&self, url: &str, params: &[(&str, &str)]) -> Result<RawPage, CanvasError> {
        let headers = self.config.headers()?;
        let mut request = self.http.get(url).headers(headers);
        if !params.is_empty() {
            request = request.query(params);
        }

        debug!(url, "GET");
        let response = request.send().await?;
        let status = response.status();
        let next = pagination::next_page_url(response.headers(), response.url());
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(deserialize_api_error(status, &body));
        }
        Ok(RawPage { body, next })
    }
}

fn decode_page<T: DeserializeOwned>(path: &str, body: &[u8]) -> Result<Vec<T>, CanvasError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| map_deser(&e, body))?;
    if !value.is_array() {
        let message = server_message(&value).unwrap_or_else(|| {
            let kind = match &value {
                Value::Object(_) => "an object",
                Value::String(_) => "a string",
                Value::Number(_) => "a number",
                Value::Bool(_) => "a boolean",
                Value::Array(_) => "an array",
                Value::Null => "null",
            };
            format!("expected a JSON array, got {kind}")
        });
        debug!(path, message = %message, "collection body is not an array");
        return Err(CanvasError::UnexpectedShape {
            path: path.to_string(),
            message,
        });
    }
    serde_json::from_value(value).map_err(|e| CanvasError::Serde(e.to_string()))
}
