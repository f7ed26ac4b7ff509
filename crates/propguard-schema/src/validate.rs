//! # Validator
//!
//! The public entry point: compile a schema once with a fixed set of
//! [`ValidatorOptions`], then validate any number of documents.
//!
//! Each call to [`Validator::validate`] is one validation session with its
//! own error sink. Documents are taken by `&mut` because strip policies
//! remove keys in place; the caller owns the document for the duration of
//! the call.
//!
//! ## Thread Safety
//!
//! `Validator` is `Send + Sync`. The compiled tree, including name sets and
//! pattern matchers, is never written after construction, so one validator
//! can serve many threads without locking.

use std::sync::Arc;

use propguard_core::{CompileError, JsonPointer, ValidationErrors, ValidatorOptions};
use serde_json::Value;

use crate::additional::AdditionalPropertiesSummary;
use crate::compile::{CompiledSchema, SchemaCompiler};
use crate::sink::{ErrorSink, ValidationSession};

/// A compiled schema plus the options it was compiled with.
#[derive(Debug, Clone)]
pub struct Validator {
    root: Arc<CompiledSchema>,
    options: ValidatorOptions,
}

impl Validator {
    /// Compile `schema` with default options (reject additional keys,
    /// fail-fast, strict).
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the schema cannot be compiled.
    pub fn new(schema: &Value) -> Result<Self, CompileError> {
        Self::with_options(schema, ValidatorOptions::default())
    }

    /// Compile `schema` with explicit options.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] if the schema cannot be compiled.
    pub fn with_options(schema: &Value, options: ValidatorOptions) -> Result<Self, CompileError> {
        let mut compiler = SchemaCompiler::new(options.clone());
        let root = compiler.compile(schema)?;
        let pattern_count = compiler.patterns().len();
        tracing::debug!(
            remove_additional = %options.remove_additional,
            all_errors = options.all_errors,
            strict = options.strict,
            patterns = pattern_count,
            "compiled schema"
        );
        Ok(Self { root, options })
    }

    /// Validate `instance`, removing keys if a strip policy is configured.
    ///
    /// # Errors
    ///
    /// Returns every recorded error (or only the first, in fail-fast mode)
    /// if the document is invalid.
    pub fn validate(&self, instance: &mut Value) -> Result<(), ValidationErrors> {
        let mut sink = ErrorSink::new();
        let mut session = ValidationSession::new(&mut sink, self.options.all_errors);
        self.root.validate(instance, &JsonPointer::root(), &mut session);
        if sink.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(sink.into_errors()))
        }
    }

    /// Returns true if `instance` is valid. Strip policies still apply.
    pub fn is_valid(&self, instance: &mut Value) -> bool {
        self.validate(instance).is_ok()
    }

    /// The options this validator was compiled with.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Compile-time summaries of every `additionalProperties` keyword that
    /// survived the skip condition, depth first.
    pub fn additional_properties(&self) -> Vec<AdditionalPropertiesSummary> {
        let mut found = Vec::new();
        self.root.collect_additional_properties(&mut found);
        found.into_iter().map(|v| v.describe()).collect()
    }
}
