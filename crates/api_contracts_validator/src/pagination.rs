//! Pagination shape checks and safe defaults.

use api_contracts_core::{PageInfo, describe_value};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Keys a list response may carry its pagination object under, in lookup order.
pub const PAGINATION_KEYS: [&str; 2] = ["pageInfo", "pagination"];

const PER_PAGE_KEYS: [&str; 2] = ["perPage", "pageSize"];

/// Expected/received pair describing a shape mismatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMismatch {
    /// What the contract requires
    pub expected: String,
    /// What was found instead
    pub received: String,
}

impl ShapeMismatch {
    pub(crate) fn new(expected: impl Into<String>, received: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            received: received.into(),
        }
    }
}

/// Returns the pagination object of a list response and the key it was found under.
pub fn find_pagination(response: &Map<String, Value>) -> Option<(&'static str, &Value)> {
    PAGINATION_KEYS
        .iter()
        .find_map(|key| response.get(*key).map(|value| (*key, value)))
}

/// Checks the pagination object of a list response.
///
/// All missing counters are reported together; the first field with the wrong
/// type is reported on its own. The per-page counter may be named `perPage`
/// or `pageSize`.
pub fn check_pagination(response: &Map<String, Value>) -> Result<(), ShapeMismatch> {
    let Some((key, value)) = find_pagination(response) else {
        return Err(ShapeMismatch::new(
            "pagination object under 'pageInfo' or 'pagination'",
            describe_value(&Value::Object(response.clone())),
        ));
    };

    let Some(page) = value.as_object() else {
        return Err(ShapeMismatch::new(
            format!("'{key}' to be an object"),
            describe_value(value),
        ));
    };

    let per_page = PER_PAGE_KEYS.iter().find(|name| page.contains_key(**name));

    let mut missing: Vec<&str> = ["totalItems", "totalPages", "currentPage"]
        .into_iter()
        .filter(|name| !page.contains_key(*name))
        .collect();
    if per_page.is_none() {
        missing.push("perPage");
    }
    if !missing.is_empty() {
        return Err(ShapeMismatch::new(
            format!("'{key}' with totalItems, totalPages, currentPage, perPage"),
            format!("missing {}", missing.join(", ")),
        ));
    }

    let counters = ["totalItems", "totalPages", "currentPage"]
        .into_iter()
        .chain(per_page.copied());
    for name in counters {
        let field = &page[name];
        if !field.is_number() {
            return Err(ShapeMismatch::new(
                format!("'{key}.{name}' to be a number"),
                describe_value(field),
            ));
        }
    }

    for name in ["hasNext", "hasPrev"] {
        if let Some(field) = page.get(name) {
            if !field.is_boolean() {
                return Err(ShapeMismatch::new(
                    format!("'{key}.{name}' to be a boolean"),
                    describe_value(field),
                ));
            }
        }
    }

    Ok(())
}

/// Reads a pagination object, falling back to an empty first page.
///
/// Never fails: anything that is not a well-formed [`PageInfo`] (wrong field
/// names, missing counters, negative or fractional numbers, `null`, strings)
/// yields `PageInfo::default()`. Whole floats such as `2.0` and a `pageSize`
/// counter are read as they are.
///
/// # Example
///
/// ```rust
/// use api_contracts_validator::safe_pagination;
/// use serde_json::json;
///
/// let page = safe_pagination(&json!({"currentPage": 1, "perPage": 10, "total": 100, "totalPages": 10}));
/// assert_eq!(page.total_items, 0);
/// assert_eq!(page.total_pages, 1);
/// ```
pub fn safe_pagination(input: &Value) -> PageInfo {
    PageInfo::deserialize(input).unwrap_or_default()
}

/// Reads the pagination object of a list response, falling back to defaults.
pub fn safe_pagination_of(response: &Value) -> PageInfo {
    response
        .as_object()
        .and_then(find_pagination)
        .map(|(_, page)| safe_pagination(page))
        .unwrap_or_default()
}
