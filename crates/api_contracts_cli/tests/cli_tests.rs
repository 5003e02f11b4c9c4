use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to test fixtures
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

/// Helper to create a Command for the apicheck binary
#[allow(deprecated)]
fn apicheck() -> Command {
    Command::cargo_bin("apicheck").expect("Failed to find apicheck binary")
}

fn stdout_json(command: &mut Command) -> Value {
    let output = command.output().expect("Failed to run apicheck");
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

// ============================================================================
// normalize command tests
// ============================================================================

#[test]
fn test_normalize_absolute_url() {
    apicheck()
        .arg("normalize")
        .arg("http://localhost:3000/api/invoices/123?status=draft")
        .assert()
        .success()
        .stdout("/invoices/123\n");
}

#[test]
fn test_normalize_duplicate_slashes() {
    apicheck()
        .arg("normalize")
        .arg("//invoices//123/")
        .assert()
        .success()
        .stdout("/invoices/123\n");
}

#[test]
fn test_verbose_flag_is_global() {
    apicheck()
        .arg("--verbose")
        .arg("normalize")
        .arg("/api")
        .assert()
        .success()
        .stdout("/\n");
}

// ============================================================================
// match command tests
// ============================================================================

#[test]
fn test_match_builtin_pattern() {
    apicheck()
        .args(["match", "put", "/api/invoices/123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PUT /invoices/:id"))
        .stdout(predicate::str::contains("123"));
}

#[test]
fn test_match_untracked() {
    apicheck()
        .args(["match", "GET", "/api/auth/me"])
        .assert()
        .success()
        .stdout(predicate::str::contains("untracked"));
}

#[test]
fn test_match_json_output() {
    let output = stdout_json(apicheck().args([
        "match",
        "POST",
        "http://localhost:3000/api/debit-notes/88/approve",
        "--format",
        "json",
    ]));

    assert_eq!(output["matched"], json!(true));
    assert_eq!(output["key"], json!("POST /debit-notes/:id/approve"));
    assert_eq!(output["path"], json!("/debit-notes/88/approve"));
    assert_eq!(output["params"], json!({"id": "88"}));
}

#[test]
fn test_match_with_registry_file() {
    let output = stdout_json(apicheck().args([
        "match",
        "GET",
        "/invoices/7",
        "--registry",
        fixture_path("registry.yml").as_str(),
        "--format",
        "json",
    ]));
    assert_eq!(output["key"], json!("GET /invoices/:id"));
    assert_eq!(output["description"], json!("Fetch one invoice"));

    let output = stdout_json(apicheck().args([
        "match",
        "GET",
        "/customers/7",
        "--registry",
        fixture_path("registry.yml").as_str(),
        "--format",
        "json",
    ]));
    assert_eq!(output["matched"], json!(false));
}

// ============================================================================
// validate command tests
// ============================================================================

#[test]
fn test_validate_list_response() {
    apicheck()
        .args(["validate", "GET", "/api/invoices?page=1"])
        .arg(fixture_path("invoice_list.json"))
        .args(["--registry", fixture_path("registry.yml").as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validation PASSED"))
        .stdout(predicate::str::contains("GET /invoices"));
}

#[test]
fn test_validate_incomplete_pagination_fails() {
    apicheck()
        .args(["validate", "GET", "/invoices"])
        .arg(fixture_path("invoice_list_bad_pagination.json"))
        .args(["--registry", fixture_path("registry.yml").as_str()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Validation FAILED"))
        .stdout(predicate::str::contains("totalItems"))
        .stdout(predicate::str::contains("perPage"))
        .stdout(predicate::str::contains("totalPages"));
}

#[test]
fn test_validate_request_payload() {
    apicheck()
        .args(["validate", "POST", "/api/customers"])
        .arg(fixture_path("customer_create.json"))
        .args(["--direction", "request"])
        .args(["--registry", fixture_path("registry.yml").as_str()])
        .assert()
        .success();
}

#[test]
fn test_validate_invalid_request_json_report() {
    let output = apicheck()
        .args(["validate", "POST", "/api/customers"])
        .arg(fixture_path("customer_create_invalid.json"))
        .args(["--direction", "request", "--format", "json"])
        .args(["--registry", fixture_path("registry.yml").as_str()])
        .output()
        .expect("Failed to run apicheck");

    assert!(!output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["passed"], json!(false));
    assert_eq!(report["matched_contract"], json!("POST /customers"));
    assert_eq!(report["summary"]["error_count"], json!(3));

    let errors = report["errors"].to_string();
    assert!(errors.contains("$.name"));
    assert!(errors.contains("$.email"));
    assert!(errors.contains("$.fax"));
}

#[test]
fn test_validate_from_stdin_with_builtin_registry() {
    let invoice = json!({
        "id": 5,
        "invoiceNumber": "INV-2024-0005",
        "customerId": 2,
        "status": "issued",
        "invoiceDate": "2024-02-01",
        "dueDate": null,
        "subtotal": 800,
        "vatAmount": 40,
        "total": 840
    });

    apicheck()
        .args(["validate", "GET", "/api/invoices/5", "-"])
        .write_stdin(invoice.to_string())
        .assert()
        .success()
        .stdout(predicate::str::contains("GET /invoices/:id"));
}

#[test]
fn test_validate_untracked_endpoint_passes_with_warning() {
    apicheck()
        .args(["validate", "GET", "/api/auth/me", "-"])
        .write_stdin("{\"user\": \"admin\"}")
        .assert()
        .success()
        .stdout(predicate::str::contains("no contract registered"));
}

#[test]
fn test_validate_missing_payload_file() {
    apicheck()
        .args(["validate", "GET", "/invoices", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read payload file"));
}

#[test]
fn test_validate_payload_not_json() {
    let temp_dir = TempDir::new().unwrap();
    let payload = temp_dir.path().join("payload.json");
    fs::write(&payload, "invoices: []").unwrap();

    apicheck()
        .args(["validate", "GET", "/invoices"])
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

// ============================================================================
// check command tests
// ============================================================================

#[test]
fn test_check_yaml_registry() {
    apicheck()
        .arg("check")
        .arg(fixture_path("registry.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Registry is valid"))
        .stdout(predicate::str::contains("Contracts:   3"))
        .stdout(predicate::str::contains("/invoices -> invoices (paginated)"));
}

#[test]
fn test_check_toml_registry() {
    apicheck()
        .arg("check")
        .arg(fixture_path("registry.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("/products -> products"))
        .stdout(predicate::str::contains("(paginated)").not());
}

#[test]
fn test_check_json_output() {
    let output = stdout_json(apicheck().args([
        "check",
        fixture_path("registry.yml").as_str(),
        "--format",
        "json",
    ]));

    assert_eq!(output["valid"], json!(true));
    assert_eq!(output["contracts"], json!(3));
    assert_eq!(output["methods"], json!({"GET": 2, "POST": 1}));
    assert_eq!(output["envelopes"][0]["array_key"], json!("invoices"));
}

#[test]
fn test_check_ambiguous_registry() {
    apicheck()
        .arg("check")
        .arg(fixture_path("ambiguous_registry.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ambiguous"));
}

#[test]
fn test_check_invalid_registry() {
    apicheck()
        .arg("check")
        .arg(fixture_path("invalid_registry.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_missing_file() {
    apicheck()
        .arg("check")
        .arg("nonexistent.yml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_check_unsupported_extension() {
    let temp_dir = TempDir::new().unwrap();
    let registry = temp_dir.path().join("registry.json");
    fs::write(&registry, "{}").unwrap();

    apicheck()
        .arg("check")
        .arg(&registry)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}
