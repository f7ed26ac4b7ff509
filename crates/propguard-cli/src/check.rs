//! # Check Subcommand
//!
//! Validates documents against a schema. Under a strip mode the documents
//! are sanitized in memory; `--write` saves the result back in the format
//! it was read in, otherwise the sanitized document is printed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use propguard_core::ValidationErrors;
use propguard_schema::Validator;
use serde::Serialize;

use crate::config::{resolve_options, OptionArgs};
use crate::document::{load_document, render_document, write_document, DocumentFormat};

/// Report format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per document.
    Json,
}

/// Arguments for the `propguard check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Schema file (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub schema: PathBuf,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Write sanitized documents back to disk.
    #[arg(long)]
    pub write: bool,

    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Documents to check (JSON or YAML).
    #[arg(value_name = "DOCUMENT", required = true)]
    pub documents: Vec<PathBuf>,
}

/// Outcome for one document.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentReport {
    /// Path as given on the command line.
    pub document: String,
    /// True if no error survived validation.
    pub valid: bool,
    /// Recorded errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    /// True if a strip policy removed keys.
    pub sanitized: bool,
    /// True if the sanitized document was written back.
    pub written: bool,
}

/// Compile the schema at `path` with the effective options.
pub fn load_validator(path: &Path, config: Option<&Path>, flags: &OptionArgs) -> Result<Validator> {
    let options = resolve_options(config, flags)?;
    let (schema, _) = load_document(path)?;
    Validator::with_options(&schema, options)
        .with_context(|| format!("cannot compile schema {}", path.display()))
}

/// Check one document, sanitizing (and optionally writing) it.
///
/// Returns the report, the sanitized document and the format it was read in.
pub fn check_document(
    validator: &Validator,
    path: &Path,
    write: bool,
) -> Result<(DocumentReport, serde_json::Value, DocumentFormat)> {
    let (original, format) = load_document(path)?;
    let mut doc = original.clone();
    let result = validator.validate(&mut doc);
    let sanitized = doc != original;
    let written = write && sanitized;
    if written {
        write_document(path, &doc, format)?;
        tracing::info!(document = %path.display(), "wrote sanitized document");
    }
    let report = DocumentReport {
        document: path.display().to_string(),
        valid: result.is_ok(),
        errors: result.err(),
        sanitized,
        written,
    };
    Ok((report, doc, format))
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if every document is valid, 1 otherwise.
pub fn run_check(args: &CheckArgs, config: Option<&Path>) -> Result<u8> {
    let validator = load_validator(&args.schema, config, &args.options)?;
    tracing::info!(
        schema = %args.schema.display(),
        documents = args.documents.len(),
        remove_additional = validator.options().remove_additional.as_str(),
        "checking documents"
    );

    let mut failed = 0usize;
    for path in &args.documents {
        let (report, doc, format) = check_document(&validator, path, args.write)?;
        if !report.valid {
            failed += 1;
        }
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(&report)?),
            OutputFormat::Text => {
                if report.valid {
                    println!("OK: {}", report.document);
                } else {
                    println!("FAIL: {}", report.document);
                }
                if let Some(errors) = &report.errors {
                    println!("{errors}");
                }
                if report.sanitized && !report.written {
                    print!("{}", render_document(&doc, format)?);
                }
            }
        }
    }

    if args.format == OutputFormat::Text {
        println!(
            "\n{}/{} document(s) passed",
            args.documents.len() - failed,
            args.documents.len()
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}
