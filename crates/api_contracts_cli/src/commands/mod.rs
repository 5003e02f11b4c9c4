pub mod check;
pub mod match_cmd;
pub mod normalize;
pub mod validate;

use anyhow::{Context, Result};
use api_contracts_parser::load_registries;
use api_contracts_registry::{
    ContractRegistry, EnvelopeRegistry, default_envelopes, default_registry,
};
use std::path::Path;
use tracing::info;

/// Registries a command runs against.
pub enum Registries {
    /// The built-in ERP tables
    Builtin,
    /// Tables loaded from a registry file
    Loaded(ContractRegistry, EnvelopeRegistry),
}

impl Registries {
    /// Loads `path` if given, otherwise uses the built-in tables.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Registries::Builtin);
        };

        info!("Loading registry: {}", path);
        let (contracts, envelopes) = load_registries(Path::new(path))
            .with_context(|| format!("Failed to load registry file: {}", path))?;
        Ok(Registries::Loaded(contracts, envelopes))
    }

    pub fn contracts(&self) -> &ContractRegistry {
        match self {
            Registries::Builtin => default_registry(),
            Registries::Loaded(contracts, _) => contracts,
        }
    }

    pub fn envelopes(&self) -> &EnvelopeRegistry {
        match self {
            Registries::Builtin => default_envelopes(),
            Registries::Loaded(_, envelopes) => envelopes,
        }
    }
}
