//! # Configuration
//!
//! Validator options come from an optional YAML or JSON configuration file
//! (`--config`), then individual command-line flags override it.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use propguard_core::{RemoveAdditional, ValidatorOptions};

use crate::document::DocumentFormat;

/// Option flags shared by every subcommand that compiles a schema.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// Additional-key removal mode: none, boolean, all or failing.
    #[arg(long, value_name = "MODE")]
    pub remove_additional: Option<RemoveAdditional>,

    /// Report every error instead of stopping at the first.
    #[arg(long)]
    pub all_errors: bool,

    /// Ignore unknown schema keywords instead of rejecting the schema.
    #[arg(long)]
    pub no_strict: bool,

    /// Declared-property count above which names are matched by set lookup.
    #[arg(long, value_name = "N")]
    pub lookup_threshold: Option<usize>,
}

impl OptionArgs {
    /// Apply the flags that were given on top of `options`.
    pub fn apply(&self, mut options: ValidatorOptions) -> ValidatorOptions {
        if let Some(mode) = self.remove_additional {
            options.remove_additional = mode;
        }
        if self.all_errors {
            options.all_errors = true;
        }
        if self.no_strict {
            options.strict = false;
        }
        if let Some(threshold) = self.lookup_threshold {
            options.property_lookup_threshold = threshold;
        }
        options
    }
}

/// Load options from `path`, or defaults when no file is given.
pub fn load_options(path: Option<&Path>) -> Result<ValidatorOptions> {
    let Some(path) = path else {
        return Ok(ValidatorOptions::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read config {}", path.display()))?;
    let options = match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?,
        DocumentFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))?,
    };
    tracing::debug!(config = %path.display(), ?options, "loaded validator options");
    Ok(options)
}

/// Resolve the effective options for a subcommand.
pub fn resolve_options(config: Option<&Path>, flags: &OptionArgs) -> Result<ValidatorOptions> {
    Ok(flags.apply(load_options(config)?))
}
