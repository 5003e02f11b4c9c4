use anyhow::Result;
use api_contracts_validator::ValidationReport;
use clap::ValueEnum;
use colored::*;
use serde_json::{Value, json};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn print_validation_report(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json_report(report),
        OutputFormat::Text => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  CONTRACT VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !report.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in report.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!(
        "  Contract:       {}",
        report.matched_contract.as_deref().unwrap_or("none")
    );
    println!(
        "  Envelope:       {}",
        if report.envelope_checked {
            "checked"
        } else {
            "not applicable"
        }
    );
    println!("  Total errors:   {}", report.errors.len());
    println!("  Total warnings: {}", report.warnings.len());
    println!("  Duration:       {}ms", report.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) -> Result<()> {
    let output = json!({
        "passed": report.passed,
        "matched_contract": report.matched_contract,
        "envelope_checked": report.envelope_checked,
        "errors": report.errors,
        "warnings": report.warnings,
        "summary": {
            "error_count": report.errors.len(),
            "warning_count": report.warnings.len(),
            "duration_ms": report.duration_ms,
        }
    });

    print_json(&output)
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
