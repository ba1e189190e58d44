//! # Check Subcommand
//!
//! Validates a website's discovery document or a local `flyweb.json` file.
//!
//! This is the read path of the protocol: here, and only here, a schema
//! violation is fatal. Fetch/parse failures (unreachable host, HTTP error
//! status, malformed JSON) are a different error class and are reported
//! before any validator output — they mean there was no document to check.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use flyweb_client::FlywebClient;
use flyweb_core::validate;

/// Arguments for the `flyweb check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Website URL (http:// or https://) or path to a local flyweb.json.
    #[arg(value_name = "TARGET")]
    pub target: String,
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 on success, 1 on check failure, 2 on operational error.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    if args.target.starts_with("http://") || args.target.starts_with("https://") {
        check_url(&args.target)
    } else {
        check_file(Path::new(&args.target))
    }
}

/// Fetch a site's well-known document and validate it.
fn check_url(base_url: &str) -> Result<u8> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?;
    let client = FlywebClient::new().context("failed to build HTTP client")?;

    let (url, value) = match runtime.block_on(client.fetch_raw(base_url)) {
        Ok(fetched) => fetched,
        Err(e) => {
            // Transport/status/syntax failure: no document to validate.
            println!("FAIL: {e}");
            return Ok(1);
        }
    };

    println!("OK: found {url}");
    report(&url, &value)
}

/// Read and parse a local file, then validate it.
fn check_file(path: &Path) -> Result<u8> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            println!("FAIL: cannot read {}: {e}", path.display());
            return Ok(1);
        }
    };

    let value: Value = match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            println!("FAIL: invalid JSON in {}: {e}", path.display());
            return Ok(1);
        }
    };

    report(&path.display().to_string(), &value)
}

/// Run the validator and print the outcome for one document.
fn report(source: &str, value: &Value) -> Result<u8> {
    let result = validate(value);

    if !result.valid {
        println!(
            "FAIL: {} — {} schema violation(s)",
            source,
            result.errors.len()
        );
        for error in &result.errors {
            println!("  - {error}");
        }
        return Ok(1);
    }

    print_summary(value);
    println!("OK: {source}");
    Ok(0)
}

/// Print a short human-readable summary of a valid document.
fn print_summary(value: &Value) {
    let entity = value["entity"].as_str().unwrap_or_default();
    let entity_type = value["entityType"].as_str().unwrap_or_default();
    println!("Entity: {entity} ({entity_type})");
    if let Some(description) = value["description"].as_str() {
        println!("  {description}");
    }
    if let Some(url) = value["url"].as_str() {
        println!("URL: {url}");
    }

    if let Some(resources) = value["resources"].as_object() {
        println!("Resources: {}", resources.len());
        for (name, resource) in resources {
            let path = resource["path"].as_str().unwrap_or_default();
            let format = resource["format"].as_str().unwrap_or_default();
            let fields: Vec<&str> = resource["fields"]
                .as_array()
                .map(|items| items.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            println!("  {name}: {path} ({format}; fields: {})", fields.join(", "));
        }
    }
}
