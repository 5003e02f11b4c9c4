use anyhow::{Context, Result};
use api_contracts_parser::parse_file;
use serde_json::json;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

pub fn execute(registry_path: &str, format: OutputFormat) -> Result<()> {
    info!("Checking registry: {}", registry_path);

    let path = Path::new(registry_path);
    let document = parse_file(path)
        .with_context(|| format!("Failed to parse registry file: {}", registry_path))?;
    let (contracts, envelopes) = document
        .into_registries()
        .with_context(|| format!("Invalid registry: {}", registry_path))?;

    let by_method = contracts.keys_by_method();

    if format == OutputFormat::Json {
        let methods: serde_json::Map<String, serde_json::Value> = by_method
            .iter()
            .map(|(method, keys)| (method.to_string(), json!(keys.len())))
            .collect();
        let envelope_list: Vec<serde_json::Value> = envelopes
            .iter()
            .map(|(prefix, envelope)| {
                json!({
                    "prefix": prefix,
                    "array_key": envelope.array_key,
                    "has_pagination": envelope.has_pagination,
                })
            })
            .collect();

        return output::print_json(&json!({
            "valid": true,
            "contracts": contracts.len(),
            "methods": methods,
            "envelopes": envelope_list,
        }));
    }

    output::print_success("Registry is valid");

    println!("\nRegistry Summary:");
    println!("  File:        {}", registry_path);
    println!("  Contracts:   {}", contracts.len());
    for (method, keys) in &by_method {
        println!("    {:<9} {}", method.to_string(), keys.len());
    }
    println!("  Envelopes:   {}", envelopes.len());
    for (prefix, envelope) in envelopes.iter() {
        let paging = if envelope.has_pagination {
            " (paginated)"
        } else {
            ""
        };
        println!("    {} -> {}{}", prefix, envelope.array_key, paging);
    }

    Ok(())
}
