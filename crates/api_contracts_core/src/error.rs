//! Error types for API contracts.
//!
//! Two families live here: [`ContractError`] for problems found while a
//! registry is being assembled, and [`ContractViolation`] for payloads that do
//! not conform to a registered contract at runtime.

use serde_json::Value;
use thiserror::Error;

/// Result type for contract registry operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Errors raised while building a contract or envelope registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractError {
    /// Registry key has no space between method and path
    #[error("Malformed contract key '{0}': expected \"METHOD /path\"")]
    MalformedKey(String),

    /// Registry key names a method we do not know
    #[error("Unknown HTTP method '{0}'")]
    UnknownMethod(String),

    /// The same method and pattern were registered twice
    #[error("Duplicate contract key: {0}")]
    DuplicateContract(String),

    /// Two parameterized patterns can match the same concrete path
    #[error("Ambiguous contract patterns: '{first}' and '{second}' match the same paths")]
    AmbiguousPatterns {
        /// Key registered first
        first: String,
        /// Key registered later
        second: String,
    },

    /// A schema attached to a contract is not well-formed
    #[error("Invalid schema for '{key}': {message}")]
    InvalidSchema {
        /// Contract key owning the schema
        key: String,
        /// Description of the problem
        message: String,
    },

    /// The same envelope prefix was registered twice
    #[error("Duplicate envelope prefix: {0}")]
    DuplicateEnvelope(String),

    /// Envelope entry is unusable
    #[error("Invalid envelope for '{prefix}': {message}")]
    InvalidEnvelope {
        /// Envelope prefix
        prefix: String,
        /// Description of the problem
        message: String,
    },
}

/// A response or payload that does not match its declared contract.
///
/// Raised synchronously by the envelope validator. It carries enough context
/// to diagnose backend/frontend shape drift from a console or test log.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("API contract violation at {endpoint}: expected {expected}, received {received}")]
pub struct ContractViolation {
    /// Endpoint the payload came from
    pub endpoint: String,
    /// Description of the expected shape
    pub expected: String,
    /// Description of what was actually received
    pub received: String,
    /// Raw response, kept for debugging envelope violations
    pub response: Option<Value>,
}

impl ContractViolation {
    /// Creates a violation without an attached response body.
    pub fn new(
        endpoint: impl Into<String>,
        expected: impl Into<String>,
        received: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            expected: expected.into(),
            received: received.into(),
            response: None,
        }
    }

    /// Attaches the raw response body.
    pub fn with_response(mut self, response: Value) -> Self {
        self.response = Some(response);
        self
    }
}

/// Short human-readable description of a JSON value's kind.
///
/// Used in `received` descriptions, e.g. `"array"`, `"string \"abc\""`.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(items) => format!("array of {} item(s)", items.len()),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
    }
}

/// Name of a JSON value's type, as used in schema issues.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
