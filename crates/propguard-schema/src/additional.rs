//! # `additionalProperties` Enforcement
//!
//! Compiles the `additionalProperties` keyword of one schema node, together
//! with its sibling `properties` and `patternProperties`, into an
//! [`AdditionalPropertiesValidator`]. Every decision is taken here, once:
//!
//! 1. **Skip.** If the keyword is `true`, absent, or an always-valid schema
//!    and the mode is not [`RemoveAdditional::All`], nothing is compiled and
//!    the object's keys are never enumerated. Under `All` an absent keyword
//!    still strips, provided the node declares `properties` or
//!    `patternProperties`.
//! 2. **Classification.** A [`KnownKeys`] classifier is built from the
//!    declared names and patterns (see [`crate::known`]).
//! 3. **Policy.** [`resolve_policy`] maps the removal mode and the shape of
//!    the keyword to one [`EnforcementPolicy`].
//!
//! At validation time the additional keys are snapshotted first, then
//! enforced one by one. Removal therefore never disturbs the enumeration.
//! The loop exits early only through [`ControlFlow::Break`], which only the
//! reject branches return, and only in fail-fast mode.
//!
//! | Policy | On an additional key |
//! |---|---|
//! | `StripAll` | remove it, no error |
//! | `RejectAll` | record `AdditionalProperty{key}` |
//! | `RejectUnlessSchemaValid` | validate the value; on failure record `AdditionalProperty{key}` with the nested errors as causes |
//! | `StripFailingOnly` | validate the value in isolation; on failure remove it, errors discarded |

use std::ops::ControlFlow;
use std::sync::Arc;

use propguard_core::{CompileError, ErrorKind, JsonPointer, RemoveAdditional, ValidationError};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::compile::{CompiledSchema, SchemaCompiler};
use crate::known::{KnownKeys, NameStrategy};
use crate::sink::ValidationSession;

/// Shape of an `additionalProperties` value, as far as policy is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintShape {
    /// `false`: no additional key is acceptable.
    Forbidden,
    /// `true` or a schema that accepts everything.
    Unconstrained,
    /// A schema that additional values must satisfy.
    Schema,
}

/// What happens to additional keys. Fixed per compiled node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EnforcementPolicy {
    /// Nothing to enforce; the keyword compiles to nothing.
    None,
    /// Report every additional key.
    RejectAll,
    /// Report additional keys whose values fail the subschema.
    RejectUnlessSchemaValid,
    /// Remove every additional key silently.
    StripAll,
    /// Remove additional keys whose values fail the subschema.
    StripFailingOnly,
}

/// Derive the enforcement policy from the removal mode and keyword shape.
///
/// Stripping on failure against `false` has nothing to validate, so it is
/// the same as stripping everything.
pub fn resolve_policy(mode: RemoveAdditional, shape: ConstraintShape) -> EnforcementPolicy {
    match (mode, shape) {
        (RemoveAdditional::All, _) => EnforcementPolicy::StripAll,
        (_, ConstraintShape::Unconstrained) => EnforcementPolicy::None,
        (RemoveAdditional::None, ConstraintShape::Forbidden) => EnforcementPolicy::RejectAll,
        (RemoveAdditional::Boolean | RemoveAdditional::Failing, ConstraintShape::Forbidden) => {
            EnforcementPolicy::StripAll
        }
        (RemoveAdditional::Failing, ConstraintShape::Schema) => EnforcementPolicy::StripFailingOnly,
        (RemoveAdditional::None | RemoveAdditional::Boolean, ConstraintShape::Schema) => {
            EnforcementPolicy::RejectUnlessSchemaValid
        }
    }
}

#[derive(Debug)]
enum Enforcement {
    StripAll,
    RejectAll,
    RejectUnlessValid(Arc<CompiledSchema>),
    StripFailing(Arc<CompiledSchema>),
}

/// Compile-time summary of one `additionalProperties` keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPropertiesSummary {
    /// Location of the keyword in the schema.
    pub schema_path: String,
    /// Selected policy.
    pub policy: EnforcementPolicy,
    /// How declared names are tested.
    pub name_strategy: NameStrategy,
    /// Number of declared names.
    pub name_count: usize,
    /// Number of declared patterns.
    pub pattern_count: usize,
}

/// Compiled `additionalProperties` keyword for one schema node.
#[derive(Debug)]
pub struct AdditionalPropertiesValidator {
    schema_path: String,
    known: KnownKeys,
    enforcement: Enforcement,
}

impl AdditionalPropertiesValidator {
    /// Compile the keyword declared on `node`, located at `path`.
    ///
    /// An absent keyword behaves as `true` on nodes that declare
    /// `properties` or `patternProperties`, so it is compiled only under
    /// [`RemoveAdditional::All`]. Returns `Ok(None)` when the skip condition
    /// holds or the node declares nothing.
    pub(crate) fn compile(
        compiler: &mut SchemaCompiler,
        node: &Map<String, Value>,
        path: &JsonPointer,
    ) -> Result<Option<Self>, CompileError> {
        let keyword_path = path.child("additionalProperties");
        let unconstrained = Value::Bool(true);
        let raw = match node.get("additionalProperties") {
            Some(raw) => raw,
            // An absent keyword only matters to strip-all, and only where
            // the node declares the keys to keep.
            None if node.contains_key("properties") || node.contains_key("patternProperties") => {
                &unconstrained
            }
            None => return Ok(None),
        };

        let shape = match raw {
            Value::Bool(false) => ConstraintShape::Forbidden,
            Value::Bool(true) => ConstraintShape::Unconstrained,
            Value::Object(_) if compiler.is_always_valid(raw) => ConstraintShape::Unconstrained,
            Value::Object(_) => ConstraintShape::Schema,
            other => {
                return Err(CompileError::InvalidSchema {
                    schema_path: keyword_path.to_string(),
                    found: crate::compile::json_type_name(other).to_string(),
                })
            }
        };

        let policy = resolve_policy(compiler.options().remove_additional, shape);
        let enforcement = match policy {
            EnforcementPolicy::None => {
                tracing::debug!(schema_path = %keyword_path, "additionalProperties is always satisfied; skipped");
                return Ok(None);
            }
            EnforcementPolicy::StripAll => Enforcement::StripAll,
            EnforcementPolicy::RejectAll => Enforcement::RejectAll,
            EnforcementPolicy::RejectUnlessSchemaValid => {
                Enforcement::RejectUnlessValid(compiler.compile_at(raw, &keyword_path)?)
            }
            EnforcementPolicy::StripFailingOnly => {
                Enforcement::StripFailing(compiler.compile_at(raw, &keyword_path)?)
            }
        };

        let names = declared_names(node, path)?;
        let patterns = match node.get("patternProperties") {
            None => Vec::new(),
            Some(Value::Object(map)) => {
                let pattern_path = path.child("patternProperties");
                map.keys()
                    .map(|p| compiler.pattern(p, &pattern_path))
                    .collect::<Result<Vec<_>, _>>()?
            }
            Some(_) => {
                return Err(CompileError::InvalidKeyword {
                    keyword: "patternProperties".into(),
                    schema_path: path.child("patternProperties").to_string(),
                    reason: "expected an object".into(),
                })
            }
        };

        let known = KnownKeys::new(names, patterns, compiler.options().property_lookup_threshold);
        tracing::debug!(
            schema_path = %keyword_path,
            policy = ?policy,
            name_strategy = ?known.name_strategy(),
            names = known.name_count(),
            patterns = known.pattern_count(),
            "compiled additionalProperties"
        );

        Ok(Some(Self {
            schema_path: keyword_path.to_string(),
            known,
            enforcement,
        }))
    }

    /// The policy this keyword enforces.
    pub fn policy(&self) -> EnforcementPolicy {
        match self.enforcement {
            Enforcement::StripAll => EnforcementPolicy::StripAll,
            Enforcement::RejectAll => EnforcementPolicy::RejectAll,
            Enforcement::RejectUnlessValid(_) => EnforcementPolicy::RejectUnlessSchemaValid,
            Enforcement::StripFailing(_) => EnforcementPolicy::StripFailingOnly,
        }
    }

    /// Location of the keyword in the schema.
    pub fn schema_path(&self) -> &str {
        &self.schema_path
    }

    /// The compiled subschema additional values are checked against, if any.
    pub fn subschema(&self) -> Option<&Arc<CompiledSchema>> {
        match &self.enforcement {
            Enforcement::RejectUnlessValid(s) | Enforcement::StripFailing(s) => Some(s),
            Enforcement::StripAll | Enforcement::RejectAll => None,
        }
    }

    /// Compile-time decision summary.
    pub fn describe(&self) -> AdditionalPropertiesSummary {
        AdditionalPropertiesSummary {
            schema_path: self.schema_path.clone(),
            policy: self.policy(),
            name_strategy: self.known.name_strategy(),
            name_count: self.known.name_count(),
            pattern_count: self.known.pattern_count(),
        }
    }

    /// Enforce the keyword on `object`, located at `path` in the instance.
    pub fn validate(
        &self,
        object: &mut Map<String, Value>,
        path: &JsonPointer,
        session: &mut ValidationSession<'_>,
    ) {
        let additional: Vec<String> = if self.known.is_empty() {
            object.keys().cloned().collect()
        } else {
            object
                .keys()
                .filter(|k| self.known.is_additional(k))
                .cloned()
                .collect()
        };

        for key in additional {
            if self.enforce(key, object, path, session).is_break() {
                break;
            }
        }
    }

    fn enforce(
        &self,
        key: String,
        object: &mut Map<String, Value>,
        path: &JsonPointer,
        session: &mut ValidationSession<'_>,
    ) -> ControlFlow<()> {
        match &self.enforcement {
            Enforcement::StripAll => {
                self.strip(object, &key, path);
                ControlFlow::Continue(())
            }
            Enforcement::RejectAll => {
                session.record(self.error(key, path, Vec::new()));
                halt(session)
            }
            Enforcement::RejectUnlessValid(schema) => {
                let Some(value) = object.get_mut(&key) else {
                    return ControlFlow::Continue(());
                };
                let mark = session.mark();
                if schema.validate(value, &path.child(key.as_str()), session) {
                    return ControlFlow::Continue(());
                }
                let causes = session.take_since(mark);
                session.record(self.error(key, path, causes));
                halt(session)
            }
            Enforcement::StripFailing(schema) => {
                let valid = match object.get_mut(&key) {
                    Some(value) => schema.validate_isolated(value, &path.child(key.as_str())),
                    None => true,
                };
                if !valid {
                    self.strip(object, &key, path);
                }
                ControlFlow::Continue(())
            }
        }
    }

    fn strip(&self, object: &mut Map<String, Value>, key: &str, path: &JsonPointer) {
        object.remove(key);
        tracing::trace!(instance_path = %path, key, schema_path = %self.schema_path, "removed additional property");
    }

    fn error(&self, key: String, path: &JsonPointer, causes: Vec<ValidationError>) -> ValidationError {
        ValidationError::new(
            ErrorKind::AdditionalProperty { key },
            path.clone(),
            self.schema_path.clone(),
        )
        .with_causes(causes)
    }
}

fn halt(session: &ValidationSession<'_>) -> ControlFlow<()> {
    if session.all_errors() {
        ControlFlow::Continue(())
    } else {
        ControlFlow::Break(())
    }
}

fn declared_names(node: &Map<String, Value>, path: &JsonPointer) -> Result<Vec<String>, CompileError> {
    match node.get("properties") {
        None => Ok(Vec::new()),
        Some(Value::Object(map)) => Ok(map.keys().cloned().collect()),
        Some(_) => Err(CompileError::InvalidKeyword {
            keyword: "properties".into(),
            schema_path: path.child("properties").to_string(),
            reason: "expected an object".into(),
        }),
    }
}
