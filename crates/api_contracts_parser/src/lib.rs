//! Parser for API contract registry documents (YAML/TOML formats).
//!
//! A registry document declares endpoint contracts and list envelopes in a
//! file, so they can be maintained next to the API they describe and loaded
//! into the same registries the built-in tables use.
//!
//! # Example
//!
//! ```rust
//! use api_contracts_parser::parse_yaml;
//!
//! let yaml = r#"
//! contracts:
//!   - key: GET /invoices/:id
//!     description: Fetch one invoice
//!     response:
//!       type: object
//!       fields:
//!         - name: id
//!           schema: { type: integer }
//! envelopes:
//!   - prefix: /invoices
//!     array_key: invoices
//!     has_pagination: true
//! "#;
//!
//! let document = parse_yaml(yaml).expect("Failed to parse registry");
//! let (contracts, envelopes) = document.into_registries().unwrap();
//! assert_eq!(contracts.len(), 1);
//! assert!(envelopes.find_contract("/api/invoices").is_some());
//! ```

mod document;

pub use document::{ContractEntry, EnvelopeEntry, RegistryDocument};

use api_contracts_core::ContractError;
use api_contracts_registry::{ContractRegistry, EnvelopeRegistry};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading a registry document.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// The document parsed but does not form a valid registry
    #[error("Invalid registry: {0}")]
    RegistryError(#[from] ContractError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported registry file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Parse a registry document from a YAML string.
pub fn parse_yaml(content: &str) -> Result<RegistryDocument> {
    let document: RegistryDocument = serde_yaml_ng::from_str(content)?;
    Ok(document)
}

/// Parse a registry document from a TOML string.
///
/// # Example
///
/// ```rust
/// use api_contracts_parser::parse_toml;
///
/// let toml = r#"
/// [[contracts]]
/// key = "GET /products"
///
/// [[envelopes]]
/// prefix = "/products"
/// array_key = "products"
/// "#;
///
/// let document = parse_toml(toml).unwrap();
/// assert_eq!(document.contracts[0].key, "GET /products");
/// assert!(!document.envelopes[0].has_pagination);
/// ```
pub fn parse_toml(content: &str) -> Result<RegistryDocument> {
    let document: RegistryDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    Ok(document)
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `RegistryFormat::Yaml`
/// * `.toml` → `RegistryFormat::Toml`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<RegistryFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(RegistryFormat::Yaml),
        "toml" => Ok(RegistryFormat::Toml),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a registry document from a file with automatic format detection.
///
/// ```no_run
/// use api_contracts_parser::parse_file;
/// use std::path::Path;
///
/// let document = parse_file(Path::new("contracts/erp.yml")).unwrap();
/// println!("{} contract(s)", document.contracts.len());
/// ```
pub fn parse_file(path: &Path) -> Result<RegistryDocument> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        RegistryFormat::Yaml => parse_yaml(&content),
        RegistryFormat::Toml => parse_toml(&content),
    }
}

/// Parse a registry file and build both registries from it.
pub fn load_registries(path: &Path) -> Result<(ContractRegistry, EnvelopeRegistry)> {
    Ok(parse_file(path)?.into_registries()?)
}
