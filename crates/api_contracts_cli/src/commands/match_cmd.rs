use anyhow::Result;
use api_contracts_core::normalize_url;
use serde_json::json;
use std::collections::BTreeMap;

use super::Registries;
use crate::output::{self, OutputFormat};

pub fn execute(method: &str, url: &str, registry: Option<&str>, format: OutputFormat) -> Result<()> {
    let registries = Registries::load(registry)?;
    let path = normalize_url(url);
    let method = method.to_ascii_uppercase();
    let found = registries.contracts().match_contract(&method, url);

    if format == OutputFormat::Json {
        let output = match &found {
            Some(found) => {
                let params: BTreeMap<&String, &String> = found.params.iter().collect();
                json!({
                    "matched": true,
                    "method": method,
                    "path": path,
                    "key": found.key.to_string(),
                    "description": found.contract.description,
                    "params": params,
                    "request": found.contract.request.describe(),
                    "response": found.contract.response.describe(),
                })
            }
            None => json!({
                "matched": false,
                "method": method,
                "path": path,
            }),
        };
        return output::print_json(&output);
    }

    let Some(found) = found else {
        output::print_info(&format!(
            "No contract registered for {method} {path} (untracked)"
        ));
        return Ok(());
    };

    output::print_success(&format!("Matched {}", found.key));
    println!("  Path:        {}", path);
    if let Some(description) = &found.contract.description {
        println!("  Description: {}", description);
    }
    let params: BTreeMap<_, _> = found.params.iter().collect();
    for (name, value) in params {
        println!("  :{:<11} {}", name, value);
    }
    println!("  Request:     {}", found.contract.request.describe());
    println!("  Response:    {}", found.contract.response.describe());

    Ok(())
}
