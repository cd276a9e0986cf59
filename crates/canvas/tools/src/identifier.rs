//! Course identifier parsing and resolution.
//!
//! Callers may name a course by numeric ID or by course code. The kind is
//! decided once, when the raw input is validated, and the resolver works from
//! the tagged value from then on.

use crate::cache::CourseCache;
use crate::error::CourseError;
use canvas_async::Client;
use canvas_async::config::Config;
use canvas_async::resources::PER_PAGE;
use canvas_async::types::Course;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Raw identifier as it arrives on the wire: a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IdentifierArg {
    Id(u64),
    /// Negative or fractional numbers; never a course ID, so treated as a code.
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for IdentifierArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for IdentifierArg {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

impl From<&str> for IdentifierArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for IdentifierArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A validated course identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseIdentifier {
    /// All ASCII digits; used as the course ID directly.
    NumericId(String),
    /// Anything else; resolved through the cache or a course listing.
    CourseCode(String),
}

impl CourseIdentifier {
    /// Classify a trimmed, non-empty string.
    pub fn parse(raw: &str) -> Result<Self, CourseError> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(CourseError::InvalidInput(
                "course_identifier must not be empty".into(),
            ));
        }
        if value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self::NumericId(value.to_string()))
        } else {
            Ok(Self::CourseCode(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::NumericId(s) | Self::CourseCode(s) => s,
        }
    }
}

impl fmt::Display for CourseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input check run at the top of every handler that takes a course.
pub fn validate_course_identifier(arg: &IdentifierArg) -> Result<CourseIdentifier, CourseError> {
    match arg {
        IdentifierArg::Id(id) => Ok(CourseIdentifier::NumericId(id.to_string())),
        IdentifierArg::Number(n) => Ok(CourseIdentifier::CourseCode(n.to_string())),
        IdentifierArg::Text(s) => CourseIdentifier::parse(s),
    }
}

/// Resolve an identifier to a numeric course ID.
///
/// Numeric IDs are trusted as-is. Codes hit the cache first; a miss costs one
/// paginated course listing, which also refreshes the cache with every course
/// it returns.
pub async fn resolve_course_id<C: Config>(
    client: &Client<C>,
    cache: &CourseCache,
    identifier: &CourseIdentifier,
) -> Result<String, CourseError> {
    let code = match identifier {
        CourseIdentifier::NumericId(id) => return Ok(id.clone()),
        CourseIdentifier::CourseCode(code) => code,
    };

    if let Some(id) = cache.id_for_code(code) {
        debug!(code = %code, id = %id, "course code cache hit");
        return Ok(id);
    }

    debug!(code = %code, "course code cache miss; listing courses");
    let courses = client
        .courses()
        .list(&[
            ("per_page", PER_PAGE),
            ("state[]", "available"),
            ("state[]", "completed"),
        ])
        .await
        .map_err(CourseError::remote("courses"))?;
    cache.refresh_from(&courses);

    courses
        .iter()
        .find(|c| c.course_code.as_deref() == Some(code.as_str()))
        .and_then(Course::id_string)
        .ok_or_else(|| CourseError::NotFound(code.clone()))
}

/// Best-effort course code for display.
///
/// Falls back to the ID itself when the course cannot be fetched or has no code.
pub async fn resolve_course_code<C: Config>(
    client: &Client<C>,
    cache: &CourseCache,
    course_id: &str,
) -> String {
    if let Some(code) = cache.code_for_id(course_id) {
        return code;
    }

    match client.courses().get(course_id).await {
        Ok(course) => {
            cache.refresh_one(&course);
            course
                .course_code
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| course_id.to_string())
        }
        Err(e) => {
            warn!(course_id, error = %e, "could not look up course code for display");
            course_id.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_are_numeric_ids() {
        assert_eq!(
            CourseIdentifier::parse("4242").unwrap(),
            CourseIdentifier::NumericId("4242".into())
        );
        assert_eq!(
            CourseIdentifier::parse(" 17 ").unwrap(),
            CourseIdentifier::NumericId("17".into())
        );
    }

    #[test]
    fn everything_else_is_a_code() {
        assert_eq!(
            CourseIdentifier::parse("badm_554_120251_246794").unwrap(),
            CourseIdentifier::CourseCode("badm_554_120251_246794".into())
        );
        assert_eq!(
            CourseIdentifier::parse("12a").unwrap(),
            CourseIdentifier::CourseCode("12a".into())
        );
        assert_eq!(
            CourseIdentifier::parse("-5").unwrap(),
            CourseIdentifier::CourseCode("-5".into())
        );
    }

    #[test]
    fn blank_is_rejected() {
        let err = CourseIdentifier::parse("  ").unwrap_err();
        assert!(matches!(err, CourseError::InvalidInput(_)));
    }

    #[test]
    fn integer_arguments_become_numeric_ids() {
        let ident = validate_course_identifier(&IdentifierArg::Id(4242)).unwrap();
        assert_eq!(ident, CourseIdentifier::NumericId("4242".into()));
    }

    #[test]
    fn negative_and_fractional_numbers_are_codes() {
        let neg: IdentifierArg = serde_json::from_value(serde_json::json!(-5)).unwrap();
        let frac: IdentifierArg = serde_json::from_value(serde_json::json!(3.5)).unwrap();
        assert_eq!(
            validate_course_identifier(&neg).unwrap(),
            CourseIdentifier::CourseCode("-5".into())
        );
        assert_eq!(
            validate_course_identifier(&frac).unwrap(),
            CourseIdentifier::CourseCode("3.5".into())
        );
    }

    #[test]
    fn wire_accepts_integers_and_strings() {
        let n: IdentifierArg = serde_json::from_value(serde_json::json!(4242)).unwrap();
        let s: IdentifierArg = serde_json::from_value(serde_json::json!("badm_554")).unwrap();
        assert_eq!(n, IdentifierArg::Id(4242));
        assert_eq!(s, IdentifierArg::Text("badm_554".into()));
    }
}
