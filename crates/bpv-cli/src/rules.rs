//! # Rules Subcommand
//!
//! Prints the required identifiers and ordered rule table of a profile.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use bpv_core::{IdentifierSource, ValidationProfile};

/// Arguments for the `bpv rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Profile to print. All profiles are printed when omitted.
    #[arg(long)]
    pub profile: Option<String>,

    /// Profile file overlaid on the built-in profiles.
    #[arg(long, value_name = "FILE")]
    pub profiles: Option<PathBuf>,
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs) -> Result<u8> {
    let registry = crate::load_registry(args.profiles.as_deref())?;

    let names: Vec<String> = match &args.profile {
        Some(name) => vec![name.clone()],
        None => registry.names().map(str::to_string).collect(),
    };

    let mut sections = Vec::with_capacity(names.len());
    for name in &names {
        let validator = registry
            .get(name)
            .with_context(|| format!("unknown profile `{name}`"))?;
        sections.push(render_profile(validator.profile()));
    }
    print!("{}", sections.join("\n"));
    Ok(0)
}

/// Human-readable listing of one profile.
pub fn render_profile(profile: &ValidationProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Profile: {}", profile.name);
    let _ = writeln!(out, "  On success: {}", profile.success_message);

    let _ = writeln!(out, "  Identifiers:");
    if profile.identifiers.is_empty() {
        let _ = writeln!(out, "    (none)");
    }
    for id in &profile.identifiers {
        let source = match &id.source {
            IdentifierSource::Body { field } => format!("body field `{field}`"),
            IdentifierSource::Header { name } => format!("header `{name}`"),
        };
        let _ = writeln!(out, "    {:<12} {:<28} {}", id.name, source, id.message);
    }

    let width = profile
        .rules
        .iter()
        .map(|rule| rule.path.as_str().len())
        .max()
        .unwrap_or(0);
    let _ = writeln!(out, "  Rules ({}):", profile.rules.len());
    for (index, rule) in profile.rules.iter().enumerate() {
        let _ = writeln!(
            out,
            "    {:>2}. {:<width$}  {:<9}  {}",
            index + 1,
            rule.path.as_str(),
            rule.check.as_str(),
            rule.message,
        );
    }
    out
}
