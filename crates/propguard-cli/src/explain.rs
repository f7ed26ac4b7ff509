//! # Explain Subcommand
//!
//! Prints the compile-time decision for every `additionalProperties`
//! keyword of a schema: enforcement policy, name strategy, and how many
//! names and patterns were declared alongside it. Keywords removed by the
//! skip condition are not listed.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use propguard_core::JsonPointer;
use propguard_schema::AdditionalPropertiesSummary;

use crate::check::{load_validator, OutputFormat};
use crate::config::OptionArgs;

/// Arguments for the `propguard explain` subcommand.
#[derive(Args, Debug)]
pub struct ExplainArgs {
    /// Schema file (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Only show keywords at or below this schema JSON Pointer.
    #[arg(long, value_name = "POINTER")]
    pub pointer: Option<String>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Summaries for the schema, keeping those at or below `pointer`.
///
/// The filter compares whole pointer segments, so `/properties/a` does not
/// select `/properties/ab`.
pub fn explain(
    schema: &Path,
    config: Option<&Path>,
    flags: &OptionArgs,
    pointer: Option<&str>,
) -> Result<Vec<AdditionalPropertiesSummary>> {
    let prefix = pointer
        .map(|p| JsonPointer::parse(p).ok_or_else(|| anyhow!("invalid JSON Pointer '{p}'")))
        .transpose()?;
    let validator = load_validator(schema, config, flags)?;
    let summaries = validator
        .additional_properties()
        .into_iter()
        .filter(|s| match &prefix {
            None => true,
            Some(prefix) => JsonPointer::parse(&s.schema_path)
                .is_some_and(|path| path.segments().starts_with(prefix.segments())),
        })
        .collect();
    Ok(summaries)
}

/// Execute the explain subcommand.
pub fn run_explain(args: &ExplainArgs, config: Option<&Path>) -> Result<u8> {
    let summaries = explain(&args.schema, config, &args.options, args.pointer.as_deref())?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Text => {
            if summaries.is_empty() {
                println!("no additionalProperties keyword is enforced");
            }
            for s in &summaries {
                println!(
                    "{}: {:?} (names: {} via {:?}, patterns: {})",
                    s.schema_path, s.policy, s.name_count, s.name_strategy, s.pattern_count
                );
            }
        }
    }
    Ok(0)
}
