//! # Validate Subcommand
//!
//! Reads a JSON document from disk, runs it through the selected profile,
//! and prints the same body the HTTP service would return.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::{Map, Value};

use bpv_core::{Document, StaticHeaders, USER_PROFILE};

/// Arguments for the `bpv validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON document to validate.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Profile to validate against.
    #[arg(long, default_value = USER_PROFILE)]
    pub profile: String,

    /// Header supplied to header-sourced identifiers. Repeatable.
    #[arg(long = "header", value_name = "NAME=VALUE", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Profile file overlaid on the built-in profiles.
    #[arg(long, value_name = "FILE")]
    pub profiles: Option<PathBuf>,
}

/// Outcome of validating one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    /// Whether the document passed.
    pub ok: bool,
    /// Response-equivalent body.
    pub body: Map<String, Value>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when the document passes, 1 when it is rejected.
/// Operational failures (unreadable file, bad JSON, unknown profile) are
/// returned as errors.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let report = validate_file(args)?;
    let rendered =
        serde_json::to_string_pretty(&report.body).context("failed to render validation result")?;
    println!("{rendered}");
    Ok(if report.ok { 0 } else { 1 })
}

/// Validate the file named by `args` without printing.
pub fn validate_file(args: &ValidateArgs) -> Result<ValidationReport> {
    let registry = crate::load_registry(args.profiles.as_deref())?;
    let validator = registry.get(&args.profile).with_context(|| {
        format!(
            "unknown profile `{}` (available: {})",
            args.profile,
            registry.names().collect::<Vec<_>>().join(", ")
        )
    })?;

    let document = read_document(&args.file)?;
    let headers: StaticHeaders = args.headers.iter().cloned().collect();
    let verdict = validator.validate(&document, &headers);

    tracing::info!(
        profile = %args.profile,
        file = %args.file.display(),
        ok = verdict.ok,
        errors = verdict.errors.len(),
        "validated document"
    );

    Ok(ValidationReport {
        ok: verdict.ok,
        body: verdict.into_response_body(&validator.profile().success_message),
    })
}

fn read_document(path: &Path) -> Result<Document> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match value {
        Value::Object(document) => Ok(document),
        other => bail!(
            "{} must contain a JSON object, found {}",
            path.display(),
            json_type_name(&other)
        ),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse `NAME=VALUE`. The value may itself contain `=`.
fn parse_header(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got `{raw}`")),
    }
}
