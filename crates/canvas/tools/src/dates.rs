use chrono::{DateTime, Utc};

/// Render a Canvas timestamp for display.
///
/// Absent or empty values become `N/A`. RFC 3339 timestamps are shown in UTC
/// as `YYYY-MM-DD HH:MM`; anything else is passed through untouched.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|s| !s.is_empty()) else {
        return "N/A".to_string();
    };
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}
