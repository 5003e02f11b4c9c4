//! URL normalization and path pattern matching.
//!
//! These functions never fail. Malformed input produces a best-effort result
//! (`false`, an empty map, or a path normalized as far as possible).

use crate::key::{PathPattern, Segment, split_segments};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Base-URL prefix: an optional `scheme://host` followed by `/api` and a
/// segment boundary. Group 1 is everything after the prefix.
static BASE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^(?:[A-Za-z][A-Za-z0-9+.\-]*://[^/?#]*)?/api([/?#].*)?$")
        .expect("base prefix regex is valid")
});

/// Turns a raw request URL into a canonical absolute path.
///
/// Steps, in order: strip a `scheme://host/api` or leading `/api` prefix,
/// drop the query string, drop the hash fragment, collapse repeated slashes,
/// remove a trailing slash (unless the path is `/`), and make sure the result
/// starts with `/`.
///
/// The steps are repeated until the path stops changing, so the function is
/// idempotent even for inputs such as `//api/invoices` whose prefix only
/// becomes visible after slashes are collapsed.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::normalize_url;
///
/// assert_eq!(
///     normalize_url("http://localhost:3000/api/invoices/123?status=draft"),
///     "/invoices/123"
/// );
/// assert_eq!(normalize_url("//invoices//123/"), "/invoices/123");
/// ```
pub fn normalize_url(url: &str) -> String {
    let mut current = normalize_once(url);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(url: &str) -> String {
    let path = match BASE_PREFIX.captures(url) {
        Some(captures) => captures.get(1).map_or("", |rest| rest.as_str()),
        None => url,
    };
    let path = strip_query(path);

    let mut collapsed = String::with_capacity(path.len() + 1);
    for ch in path.chars() {
        if ch == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(ch);
    }

    if collapsed.len() > 1 && collapsed.ends_with('/') {
        collapsed.pop();
    }
    if !collapsed.starts_with('/') {
        collapsed.insert(0, '/');
    }
    collapsed
}

/// Truncates a URL at the first `?` and then at the first `#`.
pub fn strip_query(url: &str) -> &str {
    let url = url.split_once('?').map_or(url, |(path, _)| path);
    url.split_once('#').map_or(url, |(path, _)| path)
}

/// Returns true if `url` matches `pattern` segment by segment.
///
/// Segment counts must be equal. A `:param` pattern segment matches any
/// non-empty URL segment; other segments must be equal (case-sensitive).
///
/// ```rust
/// use api_contracts_core::matches_pattern;
///
/// assert!(matches_pattern("/invoices/123", "/invoices/:id"));
/// assert!(!matches_pattern("/a/b", "/a/b/c"));
/// ```
pub fn matches_pattern(url: &str, pattern: &str) -> bool {
    PathPattern::parse(pattern).matches(url)
}

/// Extracts `:param` values from `url` according to `pattern`.
///
/// Returns an empty map if the segment counts differ.
///
/// ```rust
/// use api_contracts_core::extract_params;
///
/// let params = extract_params("/invoices/123/items/456", "/invoices/:id/items/:itemId");
/// assert_eq!(params["id"], "123");
/// assert_eq!(params["itemId"], "456");
/// ```
pub fn extract_params(url: &str, pattern: &str) -> HashMap<String, String> {
    PathPattern::parse(pattern).extract(url)
}

impl PathPattern {
    /// Returns true if the concrete path matches this pattern.
    pub fn matches(&self, url: &str) -> bool {
        let segments: Vec<&str> = split_segments(url).collect();
        if segments.len() != self.len() {
            return false;
        }

        self.segments()
            .iter()
            .zip(segments)
            .all(|(expected, actual)| match expected {
                Segment::Param(_) => true,
                Segment::Literal(literal) => literal == actual,
            })
    }

    /// Collects `:param` values from a concrete path.
    ///
    /// Only the segment counts are compared; literal segments are not checked.
    pub fn extract(&self, url: &str) -> HashMap<String, String> {
        let segments: Vec<&str> = split_segments(url).collect();
        if segments.len() != self.len() {
            return HashMap::new();
        }

        self.segments()
            .iter()
            .zip(segments)
            .filter_map(|(expected, actual)| match expected {
                Segment::Param(name) => Some((name.clone(), actual.to_string())),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}
