//! Canvas paginates collections with RFC 8288 `Link` headers:
//!
//! ```text
//! Link: <https://canvas.example.edu/api/v1/courses?page=2&per_page=100>; rel="next",
//!       <https://canvas.example.edu/api/v1/courses?page=1&per_page=100>; rel="first"
//! ```
//!
//! The `next` target already carries every query parameter, so it is requested verbatim.

use reqwest::Url;
use reqwest::header::{HeaderMap, LINK};

/// Finds the target of the first link whose `rel` includes `wanted`.
#[must_use]
pub fn find_rel(header: &str, wanted: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let matches = parts.any(|param| {
            param.trim().split_once('=').is_some_and(|(key, value)| {
                key.trim().eq_ignore_ascii_case("rel")
                    && value
                        .trim()
                        .trim_matches('"')
                        .split_whitespace()
                        .any(|rel| rel.eq_ignore_ascii_case(wanted))
            })
        });
        matches.then(|| target.to_string())
    })
}

/// Returns the absolute URL of the next page, if the response advertises one.
///
/// Relative targets are resolved against the URL of the response that carried them.
#[must_use]
pub fn next_page_url(headers: &HeaderMap, response_url: &Url) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|value| find_rel(value, "next"))
        .and_then(|target| response_url.join(&target).ok())
        .map(String::from)
}

/// True when both URLs parse and share scheme, host and port.
///
/// Credentials are only sent to the origin the first page came from.
#[must_use]
pub fn same_origin(a: &str, b: &str) -> bool {
    match (Url::parse(a), Url::parse(b)) {
        (Ok(a), Ok(b)) => a.origin() == b.origin(),
        _ => false,
    }
}
