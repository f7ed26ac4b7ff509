//! # propguard-schema: additionalProperties Compilation
//!
//! Compiles the JSON Schema `additionalProperties` keyword, together with
//! its sibling `properties` and `patternProperties`, into a decision
//! procedure that is fixed before any document is seen:
//!
//! - which keys are *known* (declared name or matching pattern), using
//!   per-name tests for small name sets and one set lookup for large ones;
//! - what happens to *additional* keys: rejected, stripped, validated, or
//!   stripped only when their value fails the subschema;
//! - whether the keyword can be skipped entirely.
//!
//! ## Modules
//!
//! - [`additional`]: the `additionalProperties` compiler and its runtime.
//! - [`known`]: known-key classification and the name strategy switch.
//! - [`pattern`]: the per-document regex cache.
//! - [`sink`]: error sink, error marks and the validation session.
//! - [`compile`]: the host compiler for the keywords around it.
//! - [`validate`]: [`Validator`], the public entry point.
//!
//! ## Example
//!
//! ```
//! use propguard_schema::{RemoveAdditional, Validator, ValidatorOptions};
//! use serde_json::json;
//!
//! let schema = json!({"properties": {"a": {}}, "additionalProperties": false});
//!
//! let strict = Validator::new(&schema).unwrap();
//! let errors = strict.validate(&mut json!({"a": 1, "b": 2})).unwrap_err();
//! assert_eq!(errors.additional_keys(), vec!["b"]);
//!
//! let opts = ValidatorOptions::default().with_remove_additional(RemoveAdditional::All);
//! let sanitizer = Validator::with_options(&schema, opts).unwrap();
//! let mut doc = json!({"a": 1, "b": 2});
//! sanitizer.validate(&mut doc).unwrap();
//! assert_eq!(doc, json!({"a": 1}));
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `propguard-core` internally.
//! - Compiled trees are immutable and `Send + Sync`.
//! - Key removal is the only mutation of a document, and only under a
//!   configured strip mode.

pub mod additional;
pub mod compile;
pub mod known;
pub mod pattern;
pub mod sink;
pub mod validate;

pub use additional::{
    resolve_policy, AdditionalPropertiesSummary, AdditionalPropertiesValidator, ConstraintShape,
    EnforcementPolicy,
};
pub use compile::{CompiledSchema, SchemaCompiler};
pub use known::{KnownKeys, NameStrategy};
pub use pattern::PatternCache;
pub use propguard_core::{
    CompileError, ErrorKind, JsonPointer, RemoveAdditional, ValidationError, ValidationErrors,
    ValidatorOptions,
};
pub use sink::{ErrorMark, ErrorSink, ValidationSession};
pub use validate::Validator;
