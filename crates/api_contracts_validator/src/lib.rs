//! # API Contracts Validator
//!
//! Development-time checks of API traffic against registered contracts:
//!
//! - Schema validation of request and response bodies ([`ApiValidator`])
//! - Envelope and pagination checks for list responses ([`EnvelopeValidator`])
//! - [`safe_pagination`], which always yields a usable [`PageInfo`]
//!
//! Validation runs in development and test builds only; see
//! [`ValidatorConfig`] for the environment overrides.
//!
//! The free functions below use the built-in ERP registries and the
//! configuration read from the environment on first use.
//!
//! ## Example
//!
//! ```rust
//! use api_contracts_validator::{ApiValidator, ValidatorConfig};
//! use api_contracts_registry::{default_envelopes, default_registry};
//! use serde_json::json;
//!
//! let validator = ApiValidator::new(
//!     default_registry(),
//!     default_envelopes(),
//!     ValidatorConfig::development(),
//! );
//!
//! let response = json!({
//!     "invoices": [],
//!     "pagination": {"currentPage": 1}
//! });
//! let violation = validator.validate_response("/api/invoices", &response).unwrap_err();
//! assert!(violation.received.contains("totalItems"));
//! ```
//!
//! [`PageInfo`]: api_contracts_core::PageInfo

mod config;
mod engine;
mod envelope;
mod pagination;

pub use config::*;
pub use engine::*;
pub use envelope::*;
pub use pagination::*;

use api_contracts_core::{ContractViolation, Direction};
use api_contracts_registry::{ContractMatch, default_envelopes, default_registry};
use serde_json::Value;
use std::sync::LazyLock;

static ENV_CONFIG: LazyLock<ValidatorConfig> = LazyLock::new(ValidatorConfig::from_env);

/// Configuration resolved from the environment, read once per process.
pub fn env_config() -> ValidatorConfig {
    *ENV_CONFIG
}

fn default_validator() -> ApiValidator<'static> {
    ApiValidator::new(default_registry(), default_envelopes(), env_config())
}

/// Finds the built-in contract for a request.
pub fn match_contract(method: &str, url: &str) -> Option<ContractMatch<'static>> {
    default_registry().match_contract(method, url)
}

/// Checks a payload against the built-in contract for the endpoint.
pub fn validate_contract<'v>(
    method: &str,
    url: &str,
    payload: &'v Value,
    direction: Direction,
) -> ContractValidation<'v> {
    default_validator().validate_contract(method, url, payload, direction)
}

/// Checks a list response against the built-in envelope for the endpoint.
pub fn validate_response<'v>(url: &str, response: &'v Value) -> Result<&'v Value, ContractViolation> {
    default_validator().validate_response(url, response)
}
