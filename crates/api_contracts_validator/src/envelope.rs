//! Envelope validation for list responses.
//!
//! A lightweight structural check that needs no schema: the response must be
//! an object holding the contract's array, plus a well-formed pagination
//! object when the contract asks for one. The first failed check is raised as
//! a [`ContractViolation`].

use crate::ValidatorConfig;
use crate::pagination::{ShapeMismatch, check_pagination};
use api_contracts_core::{ContractViolation, EnvelopeContract, describe_value, normalize_url};
use api_contracts_registry::EnvelopeRegistry;
use serde_json::Value;
use tracing::{debug, error};

/// Checks list responses against an [`EnvelopeRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeValidator<'a> {
    envelopes: &'a EnvelopeRegistry,
    config: ValidatorConfig,
}

impl<'a> EnvelopeValidator<'a> {
    /// Creates a validator over `envelopes`.
    pub fn new(envelopes: &'a EnvelopeRegistry, config: ValidatorConfig) -> Self {
        Self { envelopes, config }
    }

    /// Validates a response body and hands it back unchanged.
    ///
    /// Returns the input as-is when validation is inactive or the endpoint has
    /// no envelope contract. A violation is logged with the full response
    /// before it is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use api_contracts_core::EnvelopeContract;
    /// use api_contracts_registry::EnvelopeRegistry;
    /// use api_contracts_validator::{EnvelopeValidator, ValidatorConfig};
    /// use serde_json::json;
    ///
    /// let envelopes = EnvelopeRegistry::builder()
    ///     .envelope("/products", EnvelopeContract::list("products"))
    ///     .build()
    ///     .unwrap();
    /// let validator = EnvelopeValidator::new(&envelopes, ValidatorConfig::development());
    ///
    /// assert!(validator.validate_response("/api/products", &json!({"products": []})).is_ok());
    /// assert!(validator.validate_response("/api/products", &json!({"items": []})).is_err());
    /// ```
    pub fn validate_response<'v>(
        &self,
        url: &str,
        response: &'v Value,
    ) -> Result<&'v Value, ContractViolation> {
        if !self.config.is_active() {
            return Ok(response);
        }

        let Some(contract) = self.envelopes.find_contract(url) else {
            debug!(url, "no envelope contract for endpoint");
            return Ok(response);
        };

        let endpoint = normalize_url(url);
        match check_envelope(contract, response) {
            Ok(()) => Ok(response),
            Err(mismatch) => {
                let violation = ContractViolation::new(endpoint, mismatch.expected, mismatch.received)
                    .with_response(response.clone());
                error!(
                    endpoint = %violation.endpoint,
                    expected = %violation.expected,
                    received = %violation.received,
                    response = %response,
                    "API contract violation"
                );
                Err(violation)
            }
        }
    }
}

/// Runs the structural checks in order and stops at the first failure.
pub fn check_envelope(contract: &EnvelopeContract, response: &Value) -> Result<(), ShapeMismatch> {
    let key = contract.array_key.as_str();

    let Some(body) = response.as_object() else {
        return Err(ShapeMismatch::new(
            format!("object with '{key}' array"),
            describe_value(response),
        ));
    };

    let Some(items) = body.get(key) else {
        return Err(ShapeMismatch::new(
            format!("field '{key}'"),
            describe_value(response),
        ));
    };

    if !items.is_array() {
        return Err(ShapeMismatch::new(
            format!("'{key}' to be an array"),
            describe_value(items),
        ));
    }

    if contract.has_pagination {
        check_pagination(body)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn registry() -> EnvelopeRegistry {
        EnvelopeRegistry::builder()
            .envelope("/invoices", EnvelopeContract::paginated("invoices"))
            .envelope("/stock-batches/available", EnvelopeContract::list("batches"))
            .build()
            .unwrap()
    }

    fn violation(url: &str, response: Value) -> ContractViolation {
        let envelopes = registry();
        EnvelopeValidator::new(&envelopes, ValidatorConfig::test())
            .validate_response(url, &response)
            .unwrap_err()
    }

    #[test]
    fn test_returns_input_unchanged() {
        let envelopes = registry();
        let validator = EnvelopeValidator::new(&envelopes, ValidatorConfig::development());
        let response = json!({
            "invoices": [{"id": 1}, {"id": 2}],
            "pagination": {"currentPage": 1, "perPage": 10, "totalItems": 2, "totalPages": 1}
        });

        let returned = validator.validate_response("/invoices", &response).unwrap();
        assert!(std::ptr::eq(returned, &response));
    }

    #[test]
    fn test_rejects_non_object() {
        let v = violation("/invoices", json!([1, 2]));
        assert_eq!(v.endpoint, "/invoices");
        assert_eq!(v.expected, "object with 'invoices' array");
        assert_eq!(v.received, "array of 2 item(s)");

        let v = violation("/invoices", Value::Null);
        assert_eq!(v.received, "null");
    }

    #[test]
    fn test_rejects_missing_array_key() {
        let v = violation("/api/invoices?page=1", json!({"data": [], "pageInfo": {}}));
        assert_eq!(v.endpoint, "/invoices");
        assert_eq!(v.expected, "field 'invoices'");
        assert_eq!(v.received, "object with keys [data, pageInfo]");
    }

    #[test]
    fn test_rejects_non_array_value() {
        let v = violation("/stock-batches/available", json!({"batches": {"1": {}}}));
        assert_eq!(v.expected, "'batches' to be an array");
    }

    #[test]
    fn test_violation_keeps_response() {
        let response = json!({"invoices": [], "pagination": {"currentPage": 1}});
        let v = violation("/invoices", response.clone());
        assert_eq!(v.response, Some(response));
        assert_eq!(v.received, "missing totalItems, totalPages, perPage");
    }

    #[test]
    fn test_unpaginated_envelope_ignores_pagination() {
        let envelopes = registry();
        let validator = EnvelopeValidator::new(&envelopes, ValidatorConfig::development());
        assert!(
            validator
                .validate_response("/stock-batches/available", &json!({"batches": []}))
                .is_ok()
        );
    }

    #[test]
    fn test_untracked_and_sub_paths_pass() {
        let envelopes = registry();
        let validator = EnvelopeValidator::new(&envelopes, ValidatorConfig::development());
        let detail = json!({"id": 123, "invoiceNumber": "INV-123"});

        assert!(validator.validate_response("/invoices/123", &detail).is_ok());
        assert!(validator.validate_response("/customers", &Value::Null).is_ok());
    }

    #[test]
    fn test_inactive_config_is_passthrough() {
        let envelopes = registry();
        for config in [
            ValidatorConfig::production(),
            ValidatorConfig::development().with_disabled(true),
        ] {
            let validator = EnvelopeValidator::new(&envelopes, config);
            assert!(validator.validate_response("/invoices", &Value::Null).is_ok());
        }
    }
}
