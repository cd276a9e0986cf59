use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Cap for body snippets carried in error messages
const BODY_SNIPPET_LIMIT: usize = 400;

/// Errors that can occur when using the Canvas API client
#[derive(Debug, Error)]
pub enum CanvasError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Error payload returned by Canvas
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-reported message
        message: String,
    },

    /// A success response whose body was not the expected JSON shape
    ///
    /// Displays only the message so callers can prefix their own context.
    #[error("{message}")]
    UnexpectedShape {
        /// Request path that produced the body
        path: String,
        /// Server-reported message, or a description of the body
        message: String,
    },

    /// Configuration error (e.g., missing credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl CanvasError {
    /// Returns the HTTP status for errors carrying one
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::UnexpectedShape { .. } | Self::Config(_) | Self::Serde(_) => None,
        }
    }
}

fn snippet(body: &[u8]) -> String {
    String::from_utf8_lossy(&body[..body.len().min(BODY_SNIPPET_LIMIT)]).into_owned()
}

/// Maps a serde deserialization error to a `CanvasError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> CanvasError {
    CanvasError::Serde(format!("{e}: {}", snippet(body)))
}

/// Extracts the human-readable message from a Canvas error payload.
///
/// Canvas reports errors as `{"errors": [{"message": ...}]}`,
/// `{"errors": {"field": [...]}}`, `{"message": ...}` or `{"error": ...}`.
#[must_use]
pub fn server_message(v: &Value) -> Option<String> {
    if let Some(errors) = v.get("errors") {
        let parts: Vec<String> = match errors {
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other
                        .get("message")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(field, detail)| match detail {
                    Value::String(s) => format!("{field}: {s}"),
                    other => format!("{field}: {other}"),
                })
                .collect(),
            Value::String(s) => vec![s.clone()],
            _ => Vec::new(),
        };
        if !parts.is_empty() {
            return Some(parts.join("; "));
        }
    }

    ["message", "error"]
        .iter()
        .find_map(|key| v.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Deserializes an API error from the response body
///
/// Attempts to read a Canvas error payload, falling back to plain text on failure.
#[must_use]
pub fn deserialize_api_error(status: StatusCode, body: &[u8]) -> CanvasError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(server_message)
        .unwrap_or_else(|| {
            let text = snippet(body);
            if text.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                text
            }
        });

    CanvasError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn server_message_from_error_array() {
        let v = json!({"errors": [{"message": "Invalid access token."}]});
        assert_eq!(server_message(&v).as_deref(), Some("Invalid access token."));
    }

    #[test]
    fn server_message_joins_multiple_errors() {
        let v = json!({"errors": [{"message": "first"}, {"message": "second"}]});
        assert_eq!(server_message(&v).as_deref(), Some("first; second"));
    }

    #[test]
    fn server_message_from_field_map() {
        let v = json!({"errors": {"name": "is too long"}});
        assert_eq!(server_message(&v).as_deref(), Some("name: is too long"));
    }

    #[test]
    fn server_message_from_message_key() {
        let v = json!({"status": "unauthenticated", "message": "user authorization required"});
        assert_eq!(
            server_message(&v).as_deref(),
            Some("user authorization required")
        );
    }

    #[test]
    fn server_message_none_for_plain_records() {
        assert!(server_message(&json!({"id": 1, "name": "Course"})).is_none());
    }

    #[test]
    fn api_error_uses_payload_message() {
        let err = deserialize_api_error(
            StatusCode::UNAUTHORIZED,
            br#"{"errors":[{"message":"Invalid access token."}]}"#,
        );
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "Invalid access token. (HTTP 401)");
    }

    #[test]
    fn api_error_falls_back_to_body_text() {
        let err = deserialize_api_error(StatusCode::BAD_GATEWAY, b"upstream exploded");
        assert_eq!(err.to_string(), "upstream exploded (HTTP 502)");
    }

    #[test]
    fn api_error_empty_body_uses_reason_phrase() {
        let err = deserialize_api_error(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.to_string(), "Not Found (HTTP 404)");
    }

    #[test]
    fn api_error_caps_long_bodies() {
        let body = "x".repeat(2_000);
        match deserialize_api_error(StatusCode::INTERNAL_SERVER_ERROR, body.as_bytes()) {
            CanvasError::Api { message, .. } => assert_eq!(message.len(), BODY_SNIPPET_LIMIT),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
