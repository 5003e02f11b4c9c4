//! Contract types.
//!
//! A [`ContractDefinition`] pairs a request schema with a response schema for
//! one endpoint. An [`EnvelopeContract`] is the lighter description of a list
//! endpoint's top-level response shape.

use crate::schema::{FieldSchema, Schema, TypeSchema, UnknownKeys};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Number, Value};
use std::sync::Arc;

/// Request and response schemas for a single endpoint.
///
/// Immutable once registered. Schemas are shared behind [`Arc`] so a registry
/// can be cloned cheaply and read from many threads.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractDefinition, TypeSchema};
///
/// let contract = ContractDefinition::new(TypeSchema::Any, TypeSchema::integer())
///     .with_description("Next invoice number");
/// assert_eq!(contract.description.as_deref(), Some("Next invoice number"));
/// ```
#[derive(Debug, Clone)]
pub struct ContractDefinition {
    /// Schema the request body must satisfy
    pub request: Arc<dyn Schema>,

    /// Schema the response body must satisfy
    pub response: Arc<dyn Schema>,

    /// Optional human-readable description
    pub description: Option<String>,
}

impl ContractDefinition {
    /// Creates a contract from a request and a response schema.
    pub fn new(request: impl Schema + 'static, response: impl Schema + 'static) -> Self {
        Self {
            request: Arc::new(request),
            response: Arc::new(response),
            description: None,
        }
    }

    /// Contract that only constrains the response body.
    pub fn response_only(response: impl Schema + 'static) -> Self {
        Self::new(TypeSchema::Any, response)
    }

    /// Contract that only constrains the request body.
    pub fn request_only(request: impl Schema + 'static) -> Self {
        Self::new(request, TypeSchema::Any)
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Schema for the given direction.
    pub fn schema_for(&self, direction: Direction) -> &dyn Schema {
        match direction {
            Direction::Request => self.request.as_ref(),
            Direction::Response => self.response.as_ref(),
        }
    }
}

/// Which side of an exchange a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Body sent to the API
    Request,
    /// Body returned by the API
    Response,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Request => f.write_str("request"),
            Direction::Response => f.write_str("response"),
        }
    }
}

/// Expected top-level shape of a list endpoint's response.
///
/// `{ arrayKey: [...], pageInfo: {...} }`, where the pagination object is only
/// required when `has_pagination` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeContract {
    /// Name of the field holding the list
    #[serde(alias = "arrayKey")]
    pub array_key: String,

    /// Whether a pagination object must accompany the list
    #[serde(default, alias = "hasPagination")]
    pub has_pagination: bool,
}

impl EnvelopeContract {
    /// Envelope with a paginated list under `array_key`.
    pub fn paginated(array_key: impl Into<String>) -> Self {
        Self {
            array_key: array_key.into(),
            has_pagination: true,
        }
    }

    /// Envelope with a plain list under `array_key`.
    pub fn list(array_key: impl Into<String>) -> Self {
        Self {
            array_key: array_key.into(),
            has_pagination: false,
        }
    }
}

/// Canonical pagination descriptor consumed by list views.
///
/// Unknown fields are kept in `extra`, so newer API versions can add fields
/// without breaking older clients. Counters accept any non-negative whole
/// number, including `2.0`; the per-page counter may also arrive as `pageSize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// One-based page index
    #[serde(deserialize_with = "whole_number")]
    pub current_page: u64,

    /// Items per page
    #[serde(alias = "pageSize", deserialize_with = "whole_number")]
    pub per_page: u64,

    /// Total number of items across all pages
    #[serde(deserialize_with = "whole_number")]
    pub total_items: u64,

    /// Total number of pages
    #[serde(deserialize_with = "whole_number")]
    pub total_pages: u64,

    /// Whether a next page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next: Option<bool>,

    /// Whether a previous page exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev: Option<bool>,

    /// Fields this version does not know about
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for PageInfo {
    /// An empty first page: `{ totalItems: 0, totalPages: 1, currentPage: 1, perPage: 10 }`.
    fn default() -> Self {
        Self {
            current_page: 1,
            per_page: 10,
            total_items: 0,
            total_pages: 1,
            has_next: None,
            has_prev: None,
            extra: Map::new(),
        }
    }
}

impl PageInfo {
    /// Declarative schema for a pagination object.
    ///
    /// Counters may be any number; `perPage` may arrive as `pageSize`.
    pub fn schema() -> TypeSchema {
        let counter = |name: &str| FieldSchema::new(name, TypeSchema::number());
        let mut fields = vec![
            counter("totalItems"),
            counter("totalPages"),
            counter("currentPage"),
            counter("perPage").alias("pageSize"),
        ];
        fields.push(FieldSchema::new("hasNext", TypeSchema::Boolean).optional());
        fields.push(FieldSchema::new("hasPrev", TypeSchema::Boolean).optional());

        TypeSchema::Object {
            fields,
            unknown_keys: UnknownKeys::Passthrough,
        }
    }
}

fn whole_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Number::deserialize(deserializer)?;
    if let Some(value) = number.as_u64() {
        return Ok(value);
    }
    match number.as_f64() {
        Some(value) if value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 => {
            Ok(value as u64)
        }
        _ => Err(de::Error::custom(format!(
            "expected a non-negative whole number, got {number}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_page_info_deserialize_camel_case() {
        let page: PageInfo = serde_json::from_value(json!({
            "currentPage": 2,
            "perPage": 25,
            "totalItems": 60,
            "totalPages": 3,
            "hasNext": true
        }))
        .unwrap();

        assert_eq!(page.current_page, 2);
        assert_eq!(page.per_page, 25);
        assert_eq!(page.has_next, Some(true));
        assert_eq!(page.has_prev, None);
        assert!(page.extra.is_empty());
    }

    #[test]
    fn test_page_info_keeps_extra_fields() {
        let page: PageInfo = serde_json::from_value(json!({
            "currentPage": 1,
            "perPage": 10,
            "totalItems": 0,
            "totalPages": 1,
            "cursor": "abc"
        }))
        .unwrap();

        assert_eq!(page.extra.get("cursor"), Some(&json!("abc")));
        assert_eq!(serde_json::to_value(&page).unwrap()["cursor"], json!("abc"));
    }

    #[test]
    fn test_page_info_rejects_renamed_total() {
        let result = serde_json::from_value::<PageInfo>(json!({
            "currentPage": 1,
            "perPage": 10,
            "total": 100,
            "totalPages": 10
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_page_info_accepts_whole_floats_and_page_size() {
        let page: PageInfo = serde_json::from_value(json!({
            "currentPage": 2.0,
            "pageSize": 10,
            "totalItems": 20.0,
            "totalPages": 2
        }))
        .unwrap();

        assert_eq!(page.current_page, 2);
        assert_eq!(page.per_page, 10);
        assert_eq!(page.total_items, 20);
        assert!(page.extra.is_empty());
    }

    #[test]
    fn test_page_info_rejects_fractional_and_negative_counters() {
        for current_page in [json!(1.5), json!(-1), json!(-2.0), json!("1")] {
            let result = serde_json::from_value::<PageInfo>(json!({
                "currentPage": current_page,
                "perPage": 10,
                "totalItems": 0,
                "totalPages": 1
            }));
            assert!(result.is_err(), "currentPage: {current_page}");
        }
    }

    #[test]
    fn test_page_info_schema_accepts_page_size() {
        let schema = PageInfo::schema();
        let page = json!({"currentPage": 1, "pageSize": 10, "totalItems": 0, "totalPages": 1});
        assert!(schema.validate(&page).is_ok());

        let page = json!({"currentPage": 1.0, "perPage": 10, "totalItems": 0, "totalPages": 1});
        assert!(schema.validate(&page).is_ok());

        let issues = schema
            .validate(&json!({"currentPage": 1, "totalItems": 0, "totalPages": 1}))
            .unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$.perPage");
    }

    #[test]
    fn test_default_page_info() {
        let page = PageInfo::default();
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"currentPage": 1, "perPage": 10, "totalItems": 0, "totalPages": 1})
        );
    }

    #[test]
    fn test_envelope_aliases() {
        let envelope: EnvelopeContract =
            serde_json::from_value(json!({"arrayKey": "invoices", "hasPagination": true}))
                .unwrap();
        assert_eq!(envelope, EnvelopeContract::paginated("invoices"));

        let envelope: EnvelopeContract =
            serde_json::from_value(json!({"array_key": "products"})).unwrap();
        assert_eq!(envelope, EnvelopeContract::list("products"));
    }

    #[test]
    fn test_schema_for_direction() {
        let contract = ContractDefinition::response_only(TypeSchema::integer());
        assert_eq!(contract.schema_for(Direction::Request).describe(), "any");
        assert_eq!(contract.schema_for(Direction::Response).describe(), "integer");
    }
}
