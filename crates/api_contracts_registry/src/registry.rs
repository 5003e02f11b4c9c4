//! Contract registry and lookup.
//!
//! The registry is an ordered table from [`ContractKey`] to
//! [`ContractDefinition`]. Lookups try the exact key first and then walk the
//! parameterized patterns in registration order.

use api_contracts_core::{
    ContractDefinition, ContractError, ContractKey, HttpMethod, Result, normalize_url,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::debug;

/// A successful contract lookup.
#[derive(Debug, Clone)]
pub struct ContractMatch<'a> {
    /// Registry key that matched
    pub key: &'a ContractKey,
    /// Contract registered under that key
    pub contract: &'a ContractDefinition,
    /// Values of the key's `:param` segments
    pub params: HashMap<String, String>,
    /// Canonical path that was looked up
    pub path: String,
}

/// Read-only table of endpoint contracts.
///
/// Built once through [`ContractRegistryBuilder`], which rejects malformed,
/// duplicated and ambiguous keys, and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    contracts: IndexMap<ContractKey, ContractDefinition>,
}

impl ContractRegistry {
    /// Creates a builder.
    pub fn builder() -> ContractRegistryBuilder {
        ContractRegistryBuilder::default()
    }

    /// Number of registered contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Registered contracts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContractKey, &ContractDefinition)> {
        self.contracts.iter()
    }

    /// Contract registered under exactly this key.
    pub fn get(&self, key: &ContractKey) -> Option<&ContractDefinition> {
        self.contracts.get(key)
    }

    /// Finds the contract for a request.
    ///
    /// The method is compared case-insensitively and the URL is normalized
    /// first. An exact key wins; otherwise the first registered pattern that
    /// matches is returned. `None` means the endpoint is not tracked, which is
    /// not an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use api_contracts_core::{ContractDefinition, TypeSchema};
    /// use api_contracts_registry::ContractRegistry;
    ///
    /// let registry = ContractRegistry::builder()
    ///     .contract("PUT /invoices/:id", ContractDefinition::response_only(TypeSchema::Any))
    ///     .build()
    ///     .unwrap();
    ///
    /// let found = registry.match_contract("put", "/api/invoices/123").unwrap();
    /// assert_eq!(found.key.to_string(), "PUT /invoices/:id");
    /// assert_eq!(found.params["id"], "123");
    /// ```
    pub fn match_contract(&self, method: &str, url: &str) -> Option<ContractMatch<'_>> {
        let method: HttpMethod = method.parse().ok()?;
        let path = normalize_url(url);

        let exact = ContractKey::new(method, &path);
        if let Some((key, contract)) = self.contracts.get_key_value(&exact) {
            return Some(ContractMatch {
                params: key.pattern.extract(&path),
                key,
                contract,
                path,
            });
        }

        let found = self
            .contracts
            .iter()
            .find(|(key, _)| key.method == method && key.pattern.matches(&path));

        match found {
            Some((key, contract)) => Some(ContractMatch {
                params: key.pattern.extract(&path),
                key,
                contract,
                path,
            }),
            None => {
                debug!(%method, path = %path, "no contract registered for endpoint");
                None
            }
        }
    }

    /// Contract for a request, without match details.
    pub fn find(&self, method: &str, url: &str) -> Option<&ContractDefinition> {
        self.match_contract(method, url).map(|found| found.contract)
    }

    /// Registered keys grouped by method, in registration order.
    pub fn keys_by_method(&self) -> IndexMap<HttpMethod, Vec<&ContractKey>> {
        let mut grouped: IndexMap<HttpMethod, Vec<&ContractKey>> = IndexMap::new();
        for key in self.contracts.keys() {
            grouped.entry(key.method).or_default().push(key);
        }
        grouped
    }
}

/// Builder for a [`ContractRegistry`].
///
/// Entries keep their insertion order; errors are reported by [`build`].
///
/// [`build`]: ContractRegistryBuilder::build
#[derive(Debug, Default)]
pub struct ContractRegistryBuilder {
    entries: Vec<(String, ContractDefinition)>,
}

impl ContractRegistryBuilder {
    /// Registers a contract under a `"METHOD /path/pattern"` key.
    pub fn contract(mut self, key: impl Into<String>, contract: ContractDefinition) -> Self {
        self.entries.push((key.into(), contract));
        self
    }

    /// Registers several contracts.
    pub fn contracts<I, K>(mut self, contracts: I) -> Self
    where
        I: IntoIterator<Item = (K, ContractDefinition)>,
        K: Into<String>,
    {
        self.entries
            .extend(contracts.into_iter().map(|(key, c)| (key.into(), c)));
        self
    }

    /// Parses every key and checks the table.
    ///
    /// # Errors
    ///
    /// * `MalformedKey` / `UnknownMethod` for keys that do not parse
    /// * `DuplicateContract` when a method and pattern repeat
    /// * `AmbiguousPatterns` when two parameterized patterns of the same
    ///   method can match the same concrete path
    /// * `InvalidSchema` when a schema definition is unusable
    pub fn build(self) -> Result<ContractRegistry> {
        let mut contracts: IndexMap<ContractKey, ContractDefinition> =
            IndexMap::with_capacity(self.entries.len());

        for (raw, contract) in self.entries {
            let key: ContractKey = raw.parse()?;

            if contracts.contains_key(&key) {
                return Err(ContractError::DuplicateContract(key.to_string()));
            }
            if let Some(existing) = find_overlap(&contracts, &key) {
                return Err(ContractError::AmbiguousPatterns {
                    first: existing.to_string(),
                    second: key.to_string(),
                });
            }
            check_schemas(&key, &contract)?;

            contracts.insert(key, contract);
        }

        debug!(
            contracts = contracts.len(),
            parameterized = contracts.keys().filter(|k| k.pattern.has_params()).count(),
            "contract registry initialized"
        );

        Ok(ContractRegistry { contracts })
    }
}

/// First registered key that is ambiguous with `key`.
///
/// A fully literal key never conflicts: the exact lookup resolves it before
/// any pattern is tried.
fn find_overlap<'a>(
    contracts: &'a IndexMap<ContractKey, ContractDefinition>,
    key: &ContractKey,
) -> Option<&'a ContractKey> {
    if !key.pattern.has_params() {
        return None;
    }
    contracts.keys().find(|existing| {
        existing.method == key.method
            && existing.pattern.has_params()
            && existing.pattern.overlaps(&key.pattern)
    })
}

fn check_schemas(key: &ContractKey, contract: &ContractDefinition) -> Result<()> {
    let errors: Vec<String> = contract
        .request
        .definition_errors()
        .into_iter()
        .map(|e| format!("request {e}"))
        .chain(
            contract
                .response
                .definition_errors()
                .into_iter()
                .map(|e| format!("response {e}")),
        )
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ContractError::InvalidSchema {
            key: key.to_string(),
            message: errors.join("; "),
        })
    }
}
