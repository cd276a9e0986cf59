use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Default Canvas API base URL
pub const CANVAS_DEFAULT_BASE: &str = "https://canvas.instructure.com/api/v1";
/// Environment variable holding the Canvas access token
pub const ENV_API_TOKEN: &str = "CANVAS_API_TOKEN";
/// Environment variable holding the Canvas API base URL
pub const ENV_API_URL: &str = "CANVAS_API_URL";

/// Configuration for the Canvas client
///
/// Debug output automatically redacts `api_token` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct CanvasConfig {
    api_base: String,
    api_token: Option<SecretString>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        let api_token = std::env::var(ENV_API_TOKEN)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(SecretString::from);

        let api_base = std::env::var(ENV_API_URL)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| CANVAS_DEFAULT_BASE.into());

        Self {
            api_base,
            api_token,
        }
    }
}

impl CanvasConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `CANVAS_API_TOKEN` for bearer authentication
    /// - `CANVAS_API_URL` for the API base (defaults to `https://canvas.instructure.com/api/v1`)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the access token
    #[must_use]
    pub fn with_api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(SecretString::from(token.into()));
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

/// Configuration trait for the Canvas client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, crate::error::CanvasError>;

    /// Constructs the full URL for an API endpoint.
    ///
    /// Absolute URLs (such as pagination `next` links) are returned unchanged.
    fn url(&self, path: &str) -> String;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), crate::error::CanvasError>;
}

impl Config for CanvasConfig {
    fn headers(&self) -> Result<HeaderMap, crate::error::CanvasError> {
        use crate::error::CanvasError;

        let mut h = HeaderMap::new();

        if let Some(secret) = &self.api_token {
            let token = secret.expose_secret().trim();
            if !token.is_empty() {
                h.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {token}"))
                        .map_err(|_| CanvasError::Config("Invalid Authorization value".into()))?,
                );
            }
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.api_base.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    fn validate_auth(&self) -> Result<(), crate::error::CanvasError> {
        match &self.api_token {
            Some(secret) if !secret.expose_secret().trim().is_empty() => Ok(()),
            _ => Err(crate::error::CanvasError::Config(
                "Missing Canvas credentials: set CANVAS_API_TOKEN environment variable".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _token = EnvGuard::set(ENV_API_TOKEN, "test-token-123");
        let _base = EnvGuard::set(ENV_API_URL, "https://canvas.example.edu/api/v1");

        let cfg = CanvasConfig::new();
        assert_eq!(cfg.api_base(), "https://canvas.example.edu/api/v1");

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer test-token-123"
        );
    }

    #[test]
    #[serial(env)]
    fn config_defaults_base_url() {
        let _token = EnvGuard::set(ENV_API_TOKEN, "t");
        let _base = EnvGuard::remove(ENV_API_URL);

        let cfg = CanvasConfig::new();
        assert_eq!(cfg.api_base(), CANVAS_DEFAULT_BASE);
    }

    #[test]
    #[serial(env)]
    fn validate_auth_missing_token() {
        let _token = EnvGuard::remove(ENV_API_TOKEN);

        let cfg = CanvasConfig::new();
        let err = cfg.validate_auth().unwrap_err();
        assert!(err.to_string().contains("CANVAS_API_TOKEN"));
    }

    #[test]
    fn url_joins_base_and_path() {
        let cfg = CanvasConfig::new().with_api_base("https://canvas.example.edu/api/v1/");
        assert_eq!(
            cfg.url("/courses/42"),
            "https://canvas.example.edu/api/v1/courses/42"
        );
        assert_eq!(
            cfg.url("courses"),
            "https://canvas.example.edu/api/v1/courses"
        );
    }

    #[test]
    fn url_passes_absolute_links_through() {
        let cfg = CanvasConfig::new().with_api_base("https://canvas.example.edu/api/v1");
        let next = "https://canvas.example.edu/api/v1/courses?page=2&per_page=100";
        assert_eq!(cfg.url(next), next);
    }

    #[test]
    fn debug_output_redacts_api_token() {
        let cfg = CanvasConfig::new().with_api_token("super-secret-token-12345");
        let debug_str = format!("{cfg:?}");

        assert!(
            !debug_str.contains("super-secret-token-12345"),
            "Debug output should not contain the token"
        );
        assert!(
            debug_str.contains("[REDACTED]"),
            "Debug output should contain '[REDACTED]', got: {debug_str}"
        );
    }

    #[test]
    fn validate_auth_rejects_empty_or_whitespace() {
        let cfg = CanvasConfig::new().with_api_token("");
        assert!(cfg.validate_auth().is_err());

        let cfg = CanvasConfig::new().with_api_token("   ");
        assert!(cfg.validate_auth().is_err());

        let cfg = CanvasConfig::new().with_api_token("  valid-token  ");
        assert!(cfg.validate_auth().is_ok());
        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Bearer valid-token"
        );
    }
}
