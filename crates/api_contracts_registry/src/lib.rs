//! # API Contracts Registry
//!
//! Read-only tables mapping endpoints to their contracts.
//!
//! - [`ContractRegistry`]: `METHOD /path/pattern` keys to request/response
//!   schemas, looked up by exact key first and then by pattern
//! - [`EnvelopeRegistry`]: list paths to the expected response envelope
//!
//! Both are assembled through builders that reject malformed, duplicated and
//! ambiguous entries, and are never mutated once built. The built-in ERP
//! tables are available through [`default_registry`] and [`default_envelopes`].
//!
//! ## Example
//!
//! ```rust
//! use api_contracts_registry::{default_envelopes, default_registry};
//!
//! let found = default_registry()
//!     .match_contract("GET", "http://localhost:3000/api/invoices/42")
//!     .unwrap();
//! assert_eq!(found.key.to_string(), "GET /invoices/:id");
//!
//! assert!(default_envelopes().find_contract("/invoices/42").is_none());
//! ```

mod envelope;
mod erp;
mod registry;

pub use envelope::{EnvelopeRegistry, EnvelopeRegistryBuilder};
pub use erp::{erp_contracts, erp_envelopes};
pub use registry::{ContractMatch, ContractRegistry, ContractRegistryBuilder};

use std::sync::LazyLock;

static DEFAULT_REGISTRY: LazyLock<ContractRegistry> =
    LazyLock::new(|| erp_contracts().expect("built-in contract registry is well-formed"));

static DEFAULT_ENVELOPES: LazyLock<EnvelopeRegistry> =
    LazyLock::new(|| erp_envelopes().expect("built-in envelope registry is well-formed"));

/// The built-in ERP contract registry, built on first use.
pub fn default_registry() -> &'static ContractRegistry {
    &DEFAULT_REGISTRY
}

/// The built-in ERP envelope registry, built on first use.
pub fn default_envelopes() -> &'static EnvelopeRegistry {
    &DEFAULT_ENVELOPES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_shared() {
        assert!(std::ptr::eq(default_registry(), default_registry()));
        assert!(!default_envelopes().is_empty());
    }
}
