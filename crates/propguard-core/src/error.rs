//! # Error Types: Structured Error Hierarchy
//!
//! Two families of error exist and are never mixed:
//!
//! - [`CompileError`]: the schema itself is unusable (bad regex, wrong
//!   keyword type, unknown keyword in strict mode). Returned once, when a
//!   validator is built.
//! - [`ValidationError`]: a document broke a constraint. Recorded into an
//!   error sink during validation and handed back as [`ValidationErrors`].
//!
//! Validation errors carry the instance path, the schema path of the keyword
//! that fired, and for `additionalProperties` subschema failures the nested
//! errors that caused them.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::pointer::JsonPointer;

/// A schema could not be compiled into a validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `patternProperties` key is not a valid regular expression.
    #[error("invalid pattern '{pattern}' at {schema_path}: {reason}")]
    InvalidPattern {
        /// The pattern text as written in the schema.
        pattern: String,
        /// Location of the `patternProperties` keyword.
        schema_path: String,
        /// Regex compiler diagnostic.
        reason: String,
    },

    /// A known keyword has a value of the wrong shape.
    #[error("invalid value for keyword '{keyword}' at {schema_path}: {reason}")]
    InvalidKeyword {
        /// Keyword name.
        keyword: String,
        /// Location of the keyword.
        schema_path: String,
        /// What was expected.
        reason: String,
    },

    /// A keyword the compiler does not know, rejected in strict mode.
    #[error("unknown keyword '{keyword}' at {schema_path} (strict mode)")]
    UnknownKeyword {
        /// Keyword name.
        keyword: String,
        /// Location of the schema object holding it.
        schema_path: String,
    },

    /// A schema position holds something other than an object or boolean.
    #[error("schema at {schema_path} must be an object or a boolean, found {found}")]
    InvalidSchema {
        /// Location of the offending value.
        schema_path: String,
        /// JSON type of the offending value.
        found: String,
    },
}

/// An options value could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// Unrecognized `removeAdditional` mode.
    #[error("unknown removeAdditional mode '{0}' (expected none, boolean, all or failing)")]
    UnknownRemoveAdditional(String),
}

/// The constraint a [`ValidationError`] reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "keyword", rename_all = "camelCase")]
pub enum ErrorKind {
    /// An object key matched no declared property name or pattern and was
    /// not allowed by `additionalProperties`.
    AdditionalProperty {
        /// The offending key.
        key: String,
    },
    /// Value has the wrong JSON type.
    Type {
        /// Accepted type names.
        expected: Vec<String>,
    },
    /// Value is not one of the `enum` members.
    Enum,
    /// Value differs from `const`.
    Const,
    /// A `required` property is missing.
    Required {
        /// The missing property name.
        property: String,
    },
    /// Number below `minimum`.
    Minimum {
        /// The bound.
        limit: f64,
    },
    /// Number above `maximum`.
    Maximum {
        /// The bound.
        limit: f64,
    },
    /// String shorter than `minLength` characters.
    MinLength {
        /// The bound.
        limit: u64,
    },
    /// String longer than `maxLength` characters.
    MaxLength {
        /// The bound.
        limit: u64,
    },
    /// Object has fewer than `minProperties` keys.
    MinProperties {
        /// The bound.
        limit: u64,
    },
    /// Object has more than `maxProperties` keys.
    MaxProperties {
        /// The bound.
        limit: u64,
    },
    /// The schema at this location is `false`.
    FalseSchema,
}

impl ErrorKind {
    /// The schema keyword responsible for this error.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::AdditionalProperty { .. } => "additionalProperties",
            Self::Type { .. } => "type",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::Required { .. } => "required",
            Self::Minimum { .. } => "minimum",
            Self::Maximum { .. } => "maximum",
            Self::MinLength { .. } => "minLength",
            Self::MaxLength { .. } => "maxLength",
            Self::MinProperties { .. } => "minProperties",
            Self::MaxProperties { .. } => "maxProperties",
            Self::FalseSchema => "false",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdditionalProperty { key } => {
                write!(f, "must NOT have additional property '{key}'")
            }
            Self::Type { expected } => write!(f, "must be {}", expected.join(" or ")),
            Self::Enum => f.write_str("must be equal to one of the allowed values"),
            Self::Const => f.write_str("must be equal to constant"),
            Self::Required { property } => {
                write!(f, "must have required property '{property}'")
            }
            Self::Minimum { limit } => write!(f, "must be >= {limit}"),
            Self::Maximum { limit } => write!(f, "must be <= {limit}"),
            Self::MinLength { limit } => write!(f, "must NOT have fewer than {limit} characters"),
            Self::MaxLength { limit } => write!(f, "must NOT have more than {limit} characters"),
            Self::MinProperties { limit } => {
                write!(f, "must NOT have fewer than {limit} properties")
            }
            Self::MaxProperties { limit } => {
                write!(f, "must NOT have more than {limit} properties")
            }
            Self::FalseSchema => f.write_str("boolean schema is false"),
        }
    }
}

/// A single constraint violation with structured context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// What was violated.
    #[serde(flatten)]
    pub kind: ErrorKind,
    /// JSON Pointer to the violating value in the instance.
    pub instance_path: JsonPointer,
    /// JSON Pointer to the keyword in the schema.
    pub schema_path: String,
    /// Nested errors that caused this one (subschema failures under
    /// `additionalProperties`).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<ValidationError>,
}

impl ValidationError {
    /// Create an error with no causes.
    pub fn new(kind: ErrorKind, instance_path: JsonPointer, schema_path: impl Into<String>) -> Self {
        Self {
            kind,
            instance_path,
            schema_path: schema_path.into(),
            causes: Vec::new(),
        }
    }

    /// Attach nested errors.
    pub fn with_causes(mut self, causes: Vec<ValidationError>) -> Self {
        self.causes = causes;
        self
    }

    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth + 1);
        if self.instance_path.is_root() {
            write!(f, "{indent}(root): {}", self.kind)?;
        } else {
            write!(f, "{indent}{}: {}", self.instance_path, self.kind)?;
        }
        for cause in &self.causes {
            writeln!(f)?;
            cause.fmt_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors returned by a failed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Wrap a list of errors.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Returns the number of top-level errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all top-level errors.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Keys named by `AdditionalProperty` errors, in recording order.
    pub fn additional_keys(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| match &e.kind {
                ErrorKind::AdditionalProperty { key } => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
