//! Main validation engine.
//!
//! [`ApiValidator`] ties the contract registry, the envelope registry and the
//! runtime configuration together. It offers the two validation styles
//! callers need: a schema check that returns its issues as data, and the
//! envelope check that raises on the first failure. [`ApiValidator::check`]
//! runs both and folds the outcome into a [`ValidationReport`].

use crate::{EnvelopeValidator, ValidatorConfig};
use api_contracts_core::{ContractViolation, Direction, HttpMethod, SchemaIssue, normalize_url};
use api_contracts_registry::{ContractMatch, ContractRegistry, EnvelopeRegistry};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

/// Outcome of a schema-based contract check.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractValidation<'v> {
    /// The payload conforms, or no contract applies
    Success {
        /// The payload, unchanged
        data: &'v Value,
    },
    /// The payload violates its contract
    Failure {
        /// One issue per violated constraint
        errors: Vec<SchemaIssue>,
    },
}

impl<'v> ContractValidation<'v> {
    /// Returns true for [`ContractValidation::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, ContractValidation::Success { .. })
    }

    /// Issues found, empty on success.
    pub fn errors(&self) -> &[SchemaIssue] {
        match self {
            ContractValidation::Success { .. } => &[],
            ContractValidation::Failure { errors } => errors,
        }
    }
}

/// Aggregated result of [`ApiValidator::check`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Whether every check passed
    pub passed: bool,
    /// Failures, one line each
    pub errors: Vec<String>,
    /// Notes that do not fail the check
    pub warnings: Vec<String>,
    /// Registry key of the contract used, if any
    pub matched_contract: Option<String>,
    /// Whether an envelope contract was applied
    pub envelope_checked: bool,
    /// Wall-clock time spent validating
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Adds an error and marks the report as failed.
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.passed = false;
    }

    /// Adds a warning.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }
}

/// Validates request and response payloads against registered contracts.
///
/// Holds only shared references and a copy of the configuration, so it is
/// cheap to create per call and safe to share between threads.
///
/// # Example
///
/// ```rust
/// use api_contracts_core::{ContractDefinition, Direction, TypeSchema};
/// use api_contracts_registry::{ContractRegistry, EnvelopeRegistry};
/// use api_contracts_validator::{ApiValidator, ValidatorConfig};
/// use serde_json::json;
///
/// let contracts = ContractRegistry::builder()
///     .contract("GET /invoices/number/next", ContractDefinition::response_only(TypeSchema::integer()))
///     .build()
///     .unwrap();
/// let envelopes = EnvelopeRegistry::default();
/// let validator = ApiValidator::new(&contracts, &envelopes, ValidatorConfig::development());
///
/// let report = validator.check("GET", "/api/invoices/number/next", &json!("INV-7"), Direction::Response);
/// assert!(!report.passed);
/// assert_eq!(report.matched_contract.as_deref(), Some("GET /invoices/number/next"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiValidator<'a> {
    contracts: &'a ContractRegistry,
    envelopes: &'a EnvelopeRegistry,
    config: ValidatorConfig,
}

impl<'a> ApiValidator<'a> {
    /// Creates a validator over the given registries.
    pub fn new(
        contracts: &'a ContractRegistry,
        envelopes: &'a EnvelopeRegistry,
        config: ValidatorConfig,
    ) -> Self {
        Self {
            contracts,
            envelopes,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> ValidatorConfig {
        self.config
    }

    /// Finds the contract for a request. See [`ContractRegistry::match_contract`].
    pub fn match_contract(&self, method: &str, url: &str) -> Option<ContractMatch<'a>> {
        self.contracts.match_contract(method, url)
    }

    /// Checks a payload against the matching contract's schema.
    ///
    /// Succeeds without checking when validation is inactive or no contract is
    /// registered for the endpoint.
    pub fn validate_contract<'v>(
        &self,
        method: &str,
        url: &str,
        payload: &'v Value,
        direction: Direction,
    ) -> ContractValidation<'v> {
        if !self.config.is_active() {
            return ContractValidation::Success { data: payload };
        }

        let Some(found) = self.match_contract(method, url) else {
            return ContractValidation::Success { data: payload };
        };

        match found.contract.schema_for(direction).validate(payload) {
            Ok(()) => ContractValidation::Success { data: payload },
            Err(errors) => {
                debug!(
                    contract = %found.key,
                    %direction,
                    issues = errors.len(),
                    "payload does not match contract"
                );
                ContractValidation::Failure { errors }
            }
        }
    }

    /// Checks a list response's envelope. See [`EnvelopeValidator::validate_response`].
    pub fn validate_response<'v>(
        &self,
        url: &str,
        response: &'v Value,
    ) -> Result<&'v Value, ContractViolation> {
        EnvelopeValidator::new(self.envelopes, self.config).validate_response(url, response)
    }

    /// Runs every applicable check and collects the outcome without raising.
    ///
    /// Responses to `GET` requests are also checked against their envelope
    /// contract. Untracked endpoints pass with a warning.
    pub fn check(
        &self,
        method: &str,
        url: &str,
        payload: &Value,
        direction: Direction,
    ) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport {
            passed: true,
            ..ValidationReport::default()
        };

        if !self.config.is_active() {
            report.add_warning(format!(
                "validation inactive (mode: {}, disabled: {})",
                self.config.mode, self.config.disabled
            ));
            return finish(report, start);
        }

        let path = normalize_url(url);
        match self.match_contract(method, url) {
            Some(found) => {
                report.matched_contract = Some(found.key.to_string());
                if let Err(issues) = found.contract.schema_for(direction).validate(payload) {
                    for issue in issues {
                        report.add_error(format!("{direction} {issue}"));
                    }
                }
            }
            None => report.add_warning(format!(
                "no contract registered for {} {path}",
                method.to_ascii_uppercase()
            )),
        }

        let is_get = method.parse::<HttpMethod>().ok() == Some(HttpMethod::Get);
        if direction == Direction::Response && is_get {
            if self.envelopes.find_contract(url).is_some() {
                report.envelope_checked = true;
            }
            if let Err(violation) = self.validate_response(url, payload) {
                report.add_error(format!(
                    "envelope: expected {}, received {}",
                    violation.expected, violation.received
                ));
            }
        }

        finish(report, start)
    }
}

fn finish(mut report: ValidationReport, start: Instant) -> ValidationReport {
    report.duration_ms = start.elapsed().as_millis() as u64;
    report
}
