//! # Validator Options
//!
//! Configuration fixed at compile time for every schema node. Options are
//! read from YAML or JSON configuration files (camelCase keys) and may be
//! overridden field by field from the command line.
//!
//! ```yaml
//! removeAdditional: failing
//! allErrors: true
//! strict: true
//! propertyLookupThreshold: 8
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Declared-property count above which `additionalProperties` classification
/// switches from per-name equality tests to a single set lookup.
pub const DEFAULT_PROPERTY_LOOKUP_THRESHOLD: usize = 8;

/// How additional object keys are handled instead of (or in addition to)
/// being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveAdditional {
    /// Never remove keys; additional keys are reported.
    #[default]
    None,
    /// Remove additional keys only where `additionalProperties` is `false`.
    Boolean,
    /// Remove every additional key, whatever `additionalProperties` says.
    All,
    /// Remove additional keys whose values fail the `additionalProperties`
    /// subschema (and every key where it is `false`).
    Failing,
}

impl RemoveAdditional {
    /// The configuration-file spelling of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Boolean => "boolean",
            Self::All => "all",
            Self::Failing => "failing",
        }
    }
}

impl fmt::Display for RemoveAdditional {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RemoveAdditional {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "false" => Ok(Self::None),
            "boolean" | "true" => Ok(Self::Boolean),
            "all" => Ok(Self::All),
            "failing" => Ok(Self::Failing),
            other => Err(OptionsError::UnknownRemoveAdditional(other.to_string())),
        }
    }
}

/// Options that shape how a schema is compiled and how validation reports.
///
/// Options are captured by value when a validator is compiled and never
/// change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ValidatorOptions {
    /// Additional-key removal mode.
    pub remove_additional: RemoveAdditional,
    /// Collect every error (`true`) or stop at the first one (`false`).
    pub all_errors: bool,
    /// Reject unknown schema keywords at compile time.
    pub strict: bool,
    /// Declared-property count above which name classification uses a set
    /// lookup instead of equality tests.
    pub property_lookup_threshold: usize,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            remove_additional: RemoveAdditional::None,
            all_errors: false,
            strict: true,
            property_lookup_threshold: DEFAULT_PROPERTY_LOOKUP_THRESHOLD,
        }
    }
}

impl ValidatorOptions {
    /// Set the additional-key removal mode.
    pub fn with_remove_additional(mut self, mode: RemoveAdditional) -> Self {
        self.remove_additional = mode;
        self
    }

    /// Switch between collect-all (`true`) and fail-fast (`false`) reporting.
    pub fn with_all_errors(mut self, all_errors: bool) -> Self {
        self.all_errors = all_errors;
        self
    }

    /// Enable or disable strict keyword checking.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the name-lookup crossover point.
    pub fn with_property_lookup_threshold(mut self, threshold: usize) -> Self {
        self.property_lookup_threshold = threshold;
        self
    }
}
