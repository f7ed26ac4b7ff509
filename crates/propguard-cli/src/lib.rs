//! # propguard-cli: CLI for additionalProperties Enforcement
//!
//! Provides the `propguard` command-line interface over
//! [`propguard_schema::Validator`].
//!
//! ## Subcommands
//!
//! - `propguard check`: validate (and optionally sanitize) documents.
//! - `propguard explain`: show the compiled decision per keyword.
//!
//! Options come from an optional `--config` file (YAML or JSON, camelCase
//! keys as in [`propguard_core::ValidatorOptions`]) overridden by flags:
//!
//! ```bash
//! propguard check --schema order.schema.json orders/*.json
//! propguard check --schema order.schema.yaml --remove-additional failing --write order.yaml
//! propguard --config propguard.yaml explain --schema order.schema.json --pointer /properties
//! ```

pub mod check;
pub mod config;
pub mod document;
pub mod explain;
