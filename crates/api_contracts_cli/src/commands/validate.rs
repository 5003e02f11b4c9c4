use anyhow::{Context, Result};
use api_contracts_core::Direction;
use api_contracts_validator::{ApiValidator, ValidatorConfig};
use serde_json::Value;
use std::io::Read;
use tracing::info;

use super::Registries;
use crate::output::{self, OutputFormat};

pub fn execute(
    method: &str,
    url: &str,
    payload_path: &str,
    direction: Direction,
    registry: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    info!("Validating {} payload for {} {}", direction, method, url);

    let registries = Registries::load(registry)?;
    let payload = read_payload(payload_path)?;

    // Invoked explicitly, so validate regardless of build mode or environment.
    let validator = ApiValidator::new(
        registries.contracts(),
        registries.envelopes(),
        ValidatorConfig::development(),
    );
    let report = validator.check(method, url, &payload, direction);

    output::print_validation_report(&report, format)?;

    if !report.passed {
        std::process::exit(1);
    }

    Ok(())
}

fn read_payload(path: &str) -> Result<Value> {
    let content = if path == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload file: {}", path))?
    };

    serde_json::from_str(&content).with_context(|| format!("Payload is not valid JSON: {}", path))
}
