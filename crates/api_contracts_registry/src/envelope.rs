//! Envelope registry for list endpoints.

use api_contracts_core::{ContractError, EnvelopeContract, Result, normalize_url};
use indexmap::IndexMap;
use tracing::debug;

/// Table from canonical list path to its expected envelope.
///
/// Lookup is exact on the normalized path: `/invoices/123` does not inherit
/// the envelope of `/invoices`, and query strings never take part.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeRegistry {
    envelopes: IndexMap<String, EnvelopeContract>,
}

impl EnvelopeRegistry {
    /// Creates a builder.
    pub fn builder() -> EnvelopeRegistryBuilder {
        EnvelopeRegistryBuilder::default()
    }

    /// Envelope registered for the request URL, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use api_contracts_core::EnvelopeContract;
    /// use api_contracts_registry::EnvelopeRegistry;
    ///
    /// let envelopes = EnvelopeRegistry::builder()
    ///     .envelope("/invoices", EnvelopeContract::paginated("invoices"))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(envelopes.find_contract("/api/invoices?page=2").is_some());
    /// assert!(envelopes.find_contract("/api/invoices/123").is_none());
    /// ```
    pub fn find_contract(&self, url: &str) -> Option<&EnvelopeContract> {
        self.envelopes.get(&normalize_url(url))
    }

    /// Number of registered envelopes.
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Registered prefixes and envelopes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &EnvelopeContract)> {
        self.envelopes.iter().map(|(prefix, e)| (prefix.as_str(), e))
    }
}

/// Builder for an [`EnvelopeRegistry`].
#[derive(Debug, Default)]
pub struct EnvelopeRegistryBuilder {
    entries: Vec<(String, EnvelopeContract)>,
}

impl EnvelopeRegistryBuilder {
    /// Registers an envelope for a list path such as `/invoices`.
    pub fn envelope(mut self, prefix: impl Into<String>, envelope: EnvelopeContract) -> Self {
        self.entries.push((prefix.into(), envelope));
        self
    }

    /// Normalizes every prefix and checks the table.
    ///
    /// # Errors
    ///
    /// * `InvalidEnvelope` for a parameterized prefix or an empty array key
    /// * `DuplicateEnvelope` when two entries normalize to the same path
    pub fn build(self) -> Result<EnvelopeRegistry> {
        let mut envelopes = IndexMap::with_capacity(self.entries.len());

        for (raw, envelope) in self.entries {
            let prefix = normalize_url(&raw);

            if prefix.split('/').any(|segment| segment.starts_with(':')) {
                return Err(ContractError::InvalidEnvelope {
                    prefix,
                    message: "envelope paths cannot contain parameters".to_string(),
                });
            }
            if envelope.array_key.trim().is_empty() {
                return Err(ContractError::InvalidEnvelope {
                    prefix,
                    message: "array key is empty".to_string(),
                });
            }
            if envelopes.contains_key(&prefix) {
                return Err(ContractError::DuplicateEnvelope(prefix));
            }

            envelopes.insert(prefix, envelope);
        }

        debug!(envelopes = envelopes.len(), "envelope registry initialized");

        Ok(EnvelopeRegistry { envelopes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> EnvelopeRegistry {
        EnvelopeRegistry::builder()
            .envelope("/invoices", EnvelopeContract::paginated("invoices"))
            .envelope("/api/credit-notes/", EnvelopeContract::paginated("creditNotes"))
            .envelope("/stock-batches/available", EnvelopeContract::list("batches"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_find_exact_path() {
        let envelopes = sample();
        assert_eq!(
            envelopes.find_contract("/invoices"),
            Some(&EnvelopeContract::paginated("invoices"))
        );
        assert_eq!(
            envelopes.find_contract("http://localhost:3000/api/credit-notes?page=1"),
            Some(&EnvelopeContract::paginated("creditNotes"))
        );
    }

    #[test]
    fn test_no_sub_path_leakage() {
        let envelopes = sample();
        assert!(envelopes.find_contract("/invoices/123").is_none());
        assert!(envelopes.find_contract("/api/invoices/123/items").is_none());
        assert!(envelopes.find_contract("/stock-batches").is_none());
    }

    #[test]
    fn test_prefixes_are_normalized() {
        let registry = sample();
        let prefixes: Vec<&str> = registry.iter().map(|(prefix, _)| prefix).collect();
        assert_eq!(
            prefixes,
            vec!["/invoices", "/credit-notes", "/stock-batches/available"]
        );
    }

    #[test]
    fn test_rejects_duplicate_prefix() {
        let result = EnvelopeRegistry::builder()
            .envelope("/invoices", EnvelopeContract::paginated("invoices"))
            .envelope("/api/invoices/", EnvelopeContract::list("items"))
            .build();
        assert_eq!(
            result.unwrap_err(),
            ContractError::DuplicateEnvelope("/invoices".to_string())
        );
    }

    #[test]
    fn test_rejects_parameterized_prefix() {
        let result = EnvelopeRegistry::builder()
            .envelope("/customers/:id/invoices", EnvelopeContract::list("invoices"))
            .build();
        assert!(matches!(result, Err(ContractError::InvalidEnvelope { .. })));
    }

    #[test]
    fn test_rejects_empty_array_key() {
        let result = EnvelopeRegistry::builder()
            .envelope("/products", EnvelopeContract::list(" "))
            .build();
        assert!(matches!(result, Err(ContractError::InvalidEnvelope { .. })));
    }
}
