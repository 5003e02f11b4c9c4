//! Serializable form of a registry.

use api_contracts_core::{ContractDefinition, EnvelopeContract, TypeSchema};
use api_contracts_registry::{ContractRegistry, EnvelopeRegistry};
use serde::{Deserialize, Serialize};

/// A registry as written in a YAML or TOML file.
///
/// Nothing is checked at parse time beyond the document's shape; keys,
/// patterns and schemas are validated by [`RegistryDocument::into_registries`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryDocument {
    /// Endpoint contracts, in lookup order
    #[serde(default)]
    pub contracts: Vec<ContractEntry>,

    /// List envelopes
    #[serde(default)]
    pub envelopes: Vec<EnvelopeEntry>,
}

/// One `METHOD /path` contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractEntry {
    /// Registry key, e.g. `GET /invoices/:id`
    pub key: String,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Request body schema; absent means anything is accepted
    #[serde(default = "any_schema")]
    pub request: TypeSchema,

    /// Response body schema; absent means anything is accepted
    #[serde(default = "any_schema")]
    pub response: TypeSchema,
}

/// One list envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeEntry {
    /// List path, e.g. `/invoices`
    pub prefix: String,

    /// Field holding the list
    #[serde(alias = "arrayKey")]
    pub array_key: String,

    /// Whether a pagination object must accompany the list
    #[serde(default, alias = "hasPagination")]
    pub has_pagination: bool,
}

fn any_schema() -> TypeSchema {
    TypeSchema::Any
}

impl RegistryDocument {
    /// Builds both registries, applying every registry build check.
    pub fn into_registries(
        self,
    ) -> api_contracts_core::Result<(ContractRegistry, EnvelopeRegistry)> {
        let contracts = self
            .contracts
            .into_iter()
            .fold(ContractRegistry::builder(), |builder, entry| {
                let mut contract = ContractDefinition::new(entry.request, entry.response);
                contract.description = entry.description;
                builder.contract(entry.key, contract)
            })
            .build()?;

        let envelopes = self
            .envelopes
            .into_iter()
            .fold(EnvelopeRegistry::builder(), |builder, entry| {
                builder.envelope(
                    entry.prefix,
                    EnvelopeContract {
                        array_key: entry.array_key,
                        has_pagination: entry.has_pagination,
                    },
                )
            })
            .build()?;

        Ok((contracts, envelopes))
    }
}
