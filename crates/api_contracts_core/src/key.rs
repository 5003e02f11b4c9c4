//! Typed registry keys.
//!
//! A registry key is written as `"METHOD /path/pattern"`. It is parsed once,
//! when the registry is built, into a [`ContractKey`] so lookups never have to
//! re-split strings.

use crate::{ContractError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP methods a contract can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

impl HttpMethod {
    /// Uppercase wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            "HEAD" => Ok(HttpMethod::Head),
            "OPTIONS" => Ok(HttpMethod::Options),
            _ => Err(ContractError::UnknownMethod(s.to_string())),
        }
    }
}

/// One `/`-delimited component of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Must equal the URL segment exactly (case-sensitive)
    Literal(String),
    /// `:name`, matches any single non-empty URL segment
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix(':') {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }

    /// Returns true for `:param` segments.
    pub fn is_param(&self) -> bool {
        matches!(self, Segment::Param(_))
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(text) => f.write_str(text),
            Segment::Param(name) => write!(f, ":{name}"),
        }
    }
}

/// A parsed URL path template such as `/invoices/:id/items/:itemId`.
///
/// Empty segments are discarded while parsing, so leading, trailing and
/// duplicated slashes never change the segment count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a pattern. Never fails; any string yields a pattern.
    pub fn parse(pattern: &str) -> Self {
        Self {
            segments: split_segments(pattern).map(Segment::parse).collect(),
        }
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of path segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root pattern `/`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment is a `:param`.
    pub fn has_params(&self) -> bool {
        self.segments.iter().any(Segment::is_param)
    }

    /// Names of the `:param` segments, in order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if some concrete path could match both patterns.
    ///
    /// Patterns overlap when they have the same segment count and agree on
    /// every position where both segments are literal.
    pub fn overlaps(&self, other: &PathPattern) -> bool {
        self.len() == other.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Splits a path on `/`, dropping empty segments.
pub(crate) fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// A registry key: HTTP method plus path pattern.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractKey, HttpMethod};
///
/// let key: ContractKey = "put /invoices/:id".parse().unwrap();
/// assert_eq!(key.method, HttpMethod::Put);
/// assert_eq!(key.to_string(), "PUT /invoices/:id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractKey {
    /// HTTP method
    pub method: HttpMethod,
    /// Path pattern
    pub pattern: PathPattern,
}

impl ContractKey {
    /// Creates a key from its parts.
    pub fn new(method: HttpMethod, pattern: &str) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
        }
    }
}

impl FromStr for ContractKey {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        let (method, pattern) = s
            .trim()
            .split_once(' ')
            .ok_or_else(|| ContractError::MalformedKey(s.to_string()))?;
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(ContractError::MalformedKey(s.to_string()));
        }

        Ok(Self {
            method: method.parse()?,
            pattern: PathPattern::parse(pattern),
        })
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}
