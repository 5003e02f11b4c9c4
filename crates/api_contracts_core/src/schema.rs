//! Declarative payload schemas.
//!
//! [`Schema`] is the capability the validators depend on: check a JSON value
//! and report every violated constraint. [`TypeSchema`] is the built-in
//! implementation, declared in code or loaded from registry documents.

use crate::error::json_type_name;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use validator::ValidateEmail;

/// A structural validator for JSON payloads.
///
/// Implementations must be pure: the same value always yields the same result.
pub trait Schema: fmt::Debug + Send + Sync {
    /// Checks a value, returning one issue per violated constraint.
    fn validate(&self, value: &Value) -> Result<(), Vec<SchemaIssue>>;

    /// Short description of the accepted shape, used in diagnostics.
    fn describe(&self) -> String;

    /// Problems with the schema definition itself, checked when a registry
    /// is built. Empty when the schema is usable.
    fn definition_errors(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Category of a schema issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Value has the wrong JSON type
    InvalidType,
    /// Required field is absent
    Required,
    /// Field not declared by a strict object
    UnrecognizedKey,
    /// Below a minimum (value, length or item count)
    TooSmall,
    /// Above a maximum (value or length)
    TooBig,
    /// String does not have the declared format
    InvalidFormat,
    /// String is not one of the allowed values
    InvalidEnumValue,
    /// String does not match the declared pattern
    PatternMismatch,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaIssue {
    /// Location of the offending value, e.g. `$.items[2].quantity`
    pub path: String,
    /// Issue category
    pub code: IssueCode,
    /// Human-readable description
    pub message: String,
}

impl SchemaIssue {
    fn new(path: &str, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Well-known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringFormat {
    /// E-mail address
    Email,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339 timestamp
    DateTime,
}

impl StringFormat {
    fn as_str(&self) -> &'static str {
        match self {
            StringFormat::Email => "email",
            StringFormat::Date => "date",
            StringFormat::DateTime => "date-time",
        }
    }

    fn accepts(&self, value: &str) -> bool {
        match self {
            StringFormat::Email => value.to_owned().validate_email(),
            StringFormat::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok(),
            StringFormat::DateTime => DateTime::parse_from_rfc3339(value).is_ok(),
        }
    }
}

/// A regular expression compiled once, when the schema is created.
///
/// Serialized as its source text. An invalid expression is kept so that
/// [`TypeSchema::check_definition`] can report it; registries refuse such
/// schemas, and validation skips the pattern constraint for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    /// Compiles `source`.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source);
        Self { source, compiled }
    }

    /// The expression as written.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled expression, or `None` if it does not compile.
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref().ok()
    }

    /// The compilation error, if any.
    pub fn error(&self) -> Option<&regex::Error> {
        self.compiled.as_ref().err()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Pattern::new(source)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Pattern::new(source)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// How an object schema treats keys it does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownKeys {
    /// Undeclared keys are accepted
    #[default]
    Passthrough,
    /// Undeclared keys are reported
    Strict,
}

/// Declarative description of an accepted JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeSchema {
    /// Any value, including null
    Any,

    /// JSON string
    String {
        /// Required format
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<StringFormat>,
        /// Regular expression the value must match
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern: Option<Pattern>,
        /// Minimum length in characters
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        /// Maximum length in characters
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },

    /// Any JSON number
    Number {
        /// Inclusive minimum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Inclusive maximum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// JSON number without a fractional part
    Integer {
        /// Inclusive minimum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<i64>,
        /// Inclusive maximum
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<i64>,
    },

    /// JSON boolean
    Boolean,

    /// String from a fixed set
    Enum {
        /// Allowed values
        values: Vec<String>,
    },

    /// JSON array
    Array {
        /// Schema every element must satisfy
        items: Box<TypeSchema>,
        /// Minimum number of elements
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_items: Option<usize>,
    },

    /// JSON object with declared fields
    Object {
        /// Declared fields
        #[serde(default)]
        fields: Vec<FieldSchema>,
        /// Treatment of undeclared keys
        #[serde(default)]
        unknown_keys: UnknownKeys,
    },
}

/// A named field of an object schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name as it appears in the payload
    pub name: String,

    /// Other names the field may appear under, tried in order after `name`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Schema of the field value
    pub schema: TypeSchema,

    /// Whether the field may be absent
    #[serde(default)]
    pub optional: bool,

    /// Whether the field may be `null`
    #[serde(default)]
    pub nullable: bool,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FieldSchema {
    /// Required, non-nullable field.
    pub fn new(name: impl Into<String>, schema: TypeSchema) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            schema,
            optional: false,
            nullable: false,
            description: None,
        }
    }

    /// Accepts the field under another name as well.
    pub fn alias(mut self, name: impl Into<String>) -> Self {
        self.aliases.push(name.into());
        self
    }

    /// The field name followed by its aliases.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Marks the field as optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Marks the field as nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

impl TypeSchema {
    /// Unconstrained string.
    pub fn string() -> Self {
        TypeSchema::String {
            format: None,
            pattern: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Non-empty string.
    pub fn non_empty_string() -> Self {
        TypeSchema::String {
            format: None,
            pattern: None,
            min_length: Some(1),
            max_length: None,
        }
    }

    /// String with a well-known format.
    pub fn formatted(format: StringFormat) -> Self {
        TypeSchema::String {
            format: Some(format),
            pattern: None,
            min_length: None,
            max_length: None,
        }
    }

    /// String matching a regular expression.
    pub fn pattern(regex: impl Into<String>) -> Self {
        TypeSchema::String {
            format: None,
            pattern: Some(Pattern::new(regex)),
            min_length: None,
            max_length: None,
        }
    }

    /// Unconstrained number.
    pub fn number() -> Self {
        TypeSchema::Number {
            min: None,
            max: None,
        }
    }

    /// Number no smaller than `min`.
    pub fn number_min(min: f64) -> Self {
        TypeSchema::Number {
            min: Some(min),
            max: None,
        }
    }

    /// Unconstrained integer.
    pub fn integer() -> Self {
        TypeSchema::Integer {
            min: None,
            max: None,
        }
    }

    /// Integer no smaller than `min`.
    pub fn integer_min(min: i64) -> Self {
        TypeSchema::Integer {
            min: Some(min),
            max: None,
        }
    }

    /// String restricted to `values`.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TypeSchema::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Array whose elements satisfy `items`.
    pub fn array_of(items: TypeSchema) -> Self {
        TypeSchema::Array {
            items: Box::new(items),
            min_items: None,
        }
    }

    /// Array of at least `min` elements satisfying `items`.
    pub fn array_min(items: TypeSchema, min: usize) -> Self {
        TypeSchema::Array {
            items: Box::new(items),
            min_items: Some(min),
        }
    }

    /// Object accepting undeclared keys.
    pub fn object(fields: Vec<FieldSchema>) -> Self {
        TypeSchema::Object {
            fields,
            unknown_keys: UnknownKeys::Passthrough,
        }
    }

    /// Object rejecting undeclared keys.
    pub fn strict_object(fields: Vec<FieldSchema>) -> Self {
        TypeSchema::Object {
            fields,
            unknown_keys: UnknownKeys::Strict,
        }
    }

    /// Checks the schema definition itself.
    ///
    /// Returns one message per problem: duplicate or empty field names,
    /// invalid regular expressions, inverted bounds, empty enums.
    pub fn check_definition(&self) -> Vec<String> {
        let mut errors = Vec::new();
        self.check_definition_at("$", &mut errors);
        errors
    }

    fn check_definition_at(&self, path: &str, errors: &mut Vec<String>) {
        match self {
            TypeSchema::Any | TypeSchema::Boolean => {}
            TypeSchema::String {
                pattern,
                min_length,
                max_length,
                ..
            } => {
                if let Some(pattern) = pattern {
                    if let Some(e) = pattern.error() {
                        errors.push(format!("{path}: invalid pattern '{pattern}': {e}"));
                    }
                }
                if let (Some(min), Some(max)) = (min_length, max_length) {
                    if min > max {
                        errors.push(format!("{path}: min_length {min} exceeds max_length {max}"));
                    }
                }
            }
            TypeSchema::Number { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        errors.push(format!("{path}: min {min} exceeds max {max}"));
                    }
                }
            }
            TypeSchema::Integer { min, max } => {
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        errors.push(format!("{path}: min {min} exceeds max {max}"));
                    }
                }
            }
            TypeSchema::Enum { values } => {
                if values.is_empty() {
                    errors.push(format!("{path}: enum has no values"));
                }
            }
            TypeSchema::Array { items, .. } => {
                items.check_definition_at(&format!("{path}[]"), errors);
            }
            TypeSchema::Object { fields, .. } => {
                let mut seen = HashSet::new();
                for field in fields {
                    for name in field.names() {
                        if name.is_empty() {
                            errors.push(format!("{path}: field with empty name"));
                        }
                        if !seen.insert(name) {
                            errors.push(format!("{path}: duplicate field name '{name}'"));
                        }
                    }
                    field
                        .schema
                        .check_definition_at(&format!("{path}.{}", field.name), errors);
                }
            }
        }
    }

    fn collect_issues(&self, value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) {
        match self {
            TypeSchema::Any => {}

            TypeSchema::String {
                format,
                pattern,
                min_length,
                max_length,
            } => {
                let Some(text) = value.as_str() else {
                    issues.push(type_issue(path, "string", value));
                    return;
                };
                let length = text.chars().count();
                if let Some(min) = min_length {
                    if length < *min {
                        issues.push(SchemaIssue::new(
                            path,
                            IssueCode::TooSmall,
                            format!("string must contain at least {min} character(s)"),
                        ));
                    }
                }
                if let Some(max) = max_length {
                    if length > *max {
                        issues.push(SchemaIssue::new(
                            path,
                            IssueCode::TooBig,
                            format!("string must contain at most {max} character(s)"),
                        ));
                    }
                }
                if let Some(format) = format {
                    if !format.accepts(text) {
                        issues.push(SchemaIssue::new(
                            path,
                            IssueCode::InvalidFormat,
                            format!("invalid {} '{text}'", format.as_str()),
                        ));
                    }
                }
                if let Some(pattern) = pattern {
                    if pattern.regex().is_some_and(|regex| !regex.is_match(text)) {
                        issues.push(SchemaIssue::new(
                            path,
                            IssueCode::PatternMismatch,
                            format!("'{text}' does not match pattern '{pattern}'"),
                        ));
                    }
                }
            }

            TypeSchema::Number { min, max } => {
                let Some(number) = value.as_f64() else {
                    issues.push(type_issue(path, "number", value));
                    return;
                };
                check_bounds(path, number, *min, *max, issues);
            }

            TypeSchema::Integer { min, max } => {
                let number = match value.as_f64() {
                    Some(n) if n.fract() == 0.0 => n,
                    _ => {
                        issues.push(type_issue(path, "integer", value));
                        return;
                    }
                };
                check_bounds(
                    path,
                    number,
                    min.map(|m| m as f64),
                    max.map(|m| m as f64),
                    issues,
                );
            }

            TypeSchema::Boolean => {
                if !value.is_boolean() {
                    issues.push(type_issue(path, "boolean", value));
                }
            }

            TypeSchema::Enum { values } => match value.as_str() {
                Some(text) if values.iter().any(|allowed| allowed == text) => {}
                Some(text) => issues.push(SchemaIssue::new(
                    path,
                    IssueCode::InvalidEnumValue,
                    format!("'{text}' is not one of [{}]", values.join(", ")),
                )),
                None => issues.push(type_issue(path, "string", value)),
            },

            TypeSchema::Array { items, min_items } => {
                let Some(elements) = value.as_array() else {
                    issues.push(type_issue(path, "array", value));
                    return;
                };
                if let Some(min) = min_items {
                    if elements.len() < *min {
                        issues.push(SchemaIssue::new(
                            path,
                            IssueCode::TooSmall,
                            format!("array must contain at least {min} item(s)"),
                        ));
                    }
                }
                for (index, element) in elements.iter().enumerate() {
                    items.collect_issues(element, &format!("{path}[{index}]"), issues);
                }
            }

            TypeSchema::Object {
                fields,
                unknown_keys,
            } => {
                let Some(object) = value.as_object() else {
                    issues.push(type_issue(path, "object", value));
                    return;
                };
                for field in fields {
                    let found = field
                        .names()
                        .find_map(|name| object.get(name).map(|inner| (name, inner)));
                    match found {
                        None if field.optional => {}
                        None => issues.push(SchemaIssue::new(
                            &format!("{path}.{}", field.name),
                            IssueCode::Required,
                            "required field is missing",
                        )),
                        Some((_, Value::Null)) if field.nullable => {}
                        Some((name, inner)) => {
                            field
                                .schema
                                .collect_issues(inner, &format!("{path}.{name}"), issues)
                        }
                    }
                }
                if *unknown_keys == UnknownKeys::Strict {
                    for key in object.keys() {
                        if !fields.iter().any(|field| field.names().any(|name| name == key)) {
                            issues.push(SchemaIssue::new(
                                &format!("{path}.{key}"),
                                IssueCode::UnrecognizedKey,
                                format!("unrecognized key '{key}'"),
                            ));
                        }
                    }
                }
            }
        }
    }
}

fn type_issue(path: &str, expected: &str, value: &Value) -> SchemaIssue {
    SchemaIssue::new(
        path,
        IssueCode::InvalidType,
        format!("expected {expected}, received {}", json_type_name(value)),
    )
}

fn check_bounds(
    path: &str,
    number: f64,
    min: Option<f64>,
    max: Option<f64>,
    issues: &mut Vec<SchemaIssue>,
) {
    if let Some(min) = min {
        if number < min {
            issues.push(SchemaIssue::new(
                path,
                IssueCode::TooSmall,
                format!("{number} is less than minimum {min}"),
            ));
        }
    }
    if let Some(max) = max {
        if number > max {
            issues.push(SchemaIssue::new(
                path,
                IssueCode::TooBig,
                format!("{number} is greater than maximum {max}"),
            ));
        }
    }
}

impl Schema for TypeSchema {
    fn validate(&self, value: &Value) -> Result<(), Vec<SchemaIssue>> {
        let mut issues = Vec::new();
        self.collect_issues(value, "$", &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    fn definition_errors(&self) -> Vec<String> {
        self.check_definition()
    }

    fn describe(&self) -> String {
        match self {
            TypeSchema::Any => "any".to_string(),
            TypeSchema::String {
                format: Some(format),
                ..
            } => format!("string({})", format.as_str()),
            TypeSchema::String { .. } => "string".to_string(),
            TypeSchema::Number { .. } => "number".to_string(),
            TypeSchema::Integer { .. } => "integer".to_string(),
            TypeSchema::Boolean => "boolean".to_string(),
            TypeSchema::Enum { values } => format!("enum({})", values.join("|")),
            TypeSchema::Array { items, .. } => format!("array<{}>", items.describe()),
            TypeSchema::Object { fields, .. } => {
                let names: Vec<String> = fields
                    .iter()
                    .map(|field| {
                        let name = field.names().collect::<Vec<_>>().join("|");
                        if field.optional {
                            format!("{name}?")
                        } else {
                            name
                        }
                    })
                    .collect();
                format!("object{{{}}}", names.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn line_item() -> TypeSchema {
        TypeSchema::object(vec![
            FieldSchema::new("productId", TypeSchema::integer_min(1)),
            FieldSchema::new("quantity", TypeSchema::number_min(0.0)),
            FieldSchema::new("description", TypeSchema::string())
                .optional()
                .nullable(),
        ])
    }

    fn codes(result: Result<(), Vec<SchemaIssue>>) -> Vec<(String, IssueCode)> {
        result
            .unwrap_err()
            .into_iter()
            .map(|issue| (issue.path, issue.code))
            .collect()
    }

    #[test]
    fn test_valid_object() {
        let schema = line_item();
        let value = json!({"productId": 7, "quantity": 2.5, "description": null, "extra": 1});
        assert!(schema.validate(&value).is_ok());
    }

    #[test]
    fn test_issue_per_violated_constraint() {
        let schema = line_item();
        let value = json!({"productId": 0, "quantity": "two"});

        assert_eq!(
            codes(schema.validate(&value)),
            vec![
                ("$.productId".to_string(), IssueCode::TooSmall),
                ("$.quantity".to_string(), IssueCode::InvalidType),
            ]
        );
    }

    #[test]
    fn test_missing_required_and_null() {
        let schema = line_item();
        let value = json!({"productId": null});

        assert_eq!(
            codes(schema.validate(&value)),
            vec![
                ("$.productId".to_string(), IssueCode::InvalidType),
                ("$.quantity".to_string(), IssueCode::Required),
            ]
        );
    }

    #[test]
    fn test_strict_object_reports_unknown_keys() {
        let schema = TypeSchema::strict_object(vec![FieldSchema::new("id", TypeSchema::integer())]);
        let value = json!({"id": 1, "total": 5});
        assert_eq!(
            codes(schema.validate(&value)),
            vec![("$.total".to_string(), IssueCode::UnrecognizedKey)]
        );
    }

    #[test]
    fn test_array_paths() {
        let schema = TypeSchema::array_of(line_item());
        let value = json!([{"productId": 1, "quantity": 1}, {"productId": 2}]);
        assert_eq!(
            codes(schema.validate(&value)),
            vec![("$[1].quantity".to_string(), IssueCode::Required)]
        );
    }

    #[test]
    fn test_integer_accepts_whole_floats() {
        let schema = TypeSchema::integer();
        assert!(schema.validate(&json!(3)).is_ok());
        assert!(schema.validate(&json!(3.0)).is_ok());
        assert!(schema.validate(&json!(3.5)).is_err());
    }

    #[test]
    fn test_string_formats() {
        let email = TypeSchema::formatted(StringFormat::Email);
        assert!(email.validate(&json!("accounts@steel.ae")).is_ok());
        assert!(email.validate(&json!("not-an-email")).is_err());

        let date = TypeSchema::formatted(StringFormat::Date);
        assert!(date.validate(&json!("2024-02-29")).is_ok());
        assert!(date.validate(&json!("2023-02-29")).is_err());

        let timestamp = TypeSchema::formatted(StringFormat::DateTime);
        assert!(timestamp.validate(&json!("2024-05-01T08:30:00Z")).is_ok());
        assert!(timestamp.validate(&json!("2024-05-01 08:30")).is_err());
    }

    #[test]
    fn test_pattern_and_enum() {
        let trn = TypeSchema::pattern(r"^\d{15}$");
        assert!(trn.validate(&json!("100123456700003")).is_ok());
        assert_eq!(
            codes(trn.validate(&json!("TRN-1"))),
            vec![("$".to_string(), IssueCode::PatternMismatch)]
        );

        let status = TypeSchema::enumeration(["draft", "issued"]);
        assert!(status.validate(&json!("draft")).is_ok());
        assert_eq!(
            codes(status.validate(&json!("void"))),
            vec![("$".to_string(), IssueCode::InvalidEnumValue)]
        );
    }

    #[test]
    fn test_field_aliases() {
        let schema = TypeSchema::strict_object(vec![
            FieldSchema::new("perPage", TypeSchema::integer_min(1)).alias("pageSize"),
        ]);
        assert!(schema.validate(&json!({"perPage": 10})).is_ok());
        assert!(schema.validate(&json!({"pageSize": 10})).is_ok());
        assert_eq!(
            codes(schema.validate(&json!({"pageSize": 0}))),
            vec![("$.pageSize".to_string(), IssueCode::TooSmall)]
        );
        assert_eq!(
            codes(schema.validate(&json!({"size": 10}))),
            vec![
                ("$.perPage".to_string(), IssueCode::Required),
                ("$.size".to_string(), IssueCode::UnrecognizedKey),
            ]
        );
        assert_eq!(schema.describe(), "object{perPage|pageSize}");
    }

    #[test]
    fn test_pattern_keeps_compiled_regex() {
        let pattern = Pattern::new(r"^INV-\d+$");
        assert!(pattern.error().is_none());
        assert!(pattern.regex().is_some_and(|regex| regex.is_match("INV-42")));
        assert_eq!(pattern.to_string(), r"^INV-\d+$");

        let broken = Pattern::new("(");
        assert!(broken.regex().is_none());
        assert!(broken.error().is_some());

        let schema = TypeSchema::array_of(TypeSchema::pattern(r"^INV-\d+$"));
        let numbers: Vec<Value> = (0..500).map(|n| json!(format!("INV-{n}"))).collect();
        assert!(schema.validate(&Value::Array(numbers)).is_ok());
    }

    #[test]
    fn test_pattern_serializes_as_source() {
        let schema = TypeSchema::pattern(r"^\d{15}$");
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"type": "string", "pattern": r"^\d{15}$"}));

        let parsed: TypeSchema = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, schema);
    }

    #[test]
    fn test_array_min() {
        let schema = TypeSchema::array_min(TypeSchema::integer(), 1);
        assert!(schema.validate(&json!([1])).is_ok());
        assert_eq!(
            codes(schema.validate(&json!([]))),
            vec![("$".to_string(), IssueCode::TooSmall)]
        );
    }

    #[test]
    fn test_check_definition() {
        let schema = TypeSchema::object(vec![
            FieldSchema::new("a", TypeSchema::pattern("(")),
            FieldSchema::new("a", TypeSchema::Integer { min: Some(5), max: Some(1) }),
            FieldSchema::new("b", TypeSchema::enumeration(Vec::<String>::new())),
        ]);
        let errors = schema.check_definition();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("duplicate field name 'a'")));

        assert!(crate::PageInfo::schema().check_definition().is_empty());
    }

    #[test]
    fn test_describe() {
        assert_eq!(TypeSchema::array_of(TypeSchema::integer()).describe(), "array<integer>");
        assert_eq!(line_item().describe(), "object{productId, quantity, description?}");
        assert_eq!(TypeSchema::formatted(StringFormat::Date).describe(), "string(date)");
    }

    #[test]
    fn test_deserialize_from_json() {
        let schema: TypeSchema = serde_json::from_value(json!({
            "type": "object",
            "unknown_keys": "strict",
            "fields": [
                {"name": "email", "schema": {"type": "string", "format": "email"}, "optional": true},
                {"name": "tags", "schema": {"type": "array", "items": {"type": "string"}}}
            ]
        }))
        .unwrap();

        assert_eq!(
            schema,
            TypeSchema::strict_object(vec![
                FieldSchema::new("email", TypeSchema::formatted(StringFormat::Email)).optional(),
                FieldSchema::new("tags", TypeSchema::array_of(TypeSchema::string())),
            ])
        );
    }
}
