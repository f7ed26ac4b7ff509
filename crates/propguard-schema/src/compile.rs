//! # Schema Compilation
//!
//! Turns a JSON Schema value into an immutable [`CompiledSchema`] tree.
//! Compilation happens once; the tree is then shared (`Arc`) by every
//! validation and is `Send + Sync`.
//!
//! The keyword set is deliberately small: enough to give
//! `additionalProperties` real subschemas to check values against.
//!
//! | Keyword | Applies to |
//! |---|---|
//! | `type`, `enum`, `const` | any value |
//! | `minimum`, `maximum` | numbers |
//! | `minLength`, `maxLength` | strings |
//! | `items` (single schema) | arrays |
//! | `required`, `minProperties`, `maxProperties`, `additionalProperties`, `properties`, `patternProperties` | objects |
//!
//! Annotation keywords are ignored. Unknown keywords fail compilation in
//! strict mode and are ignored with a warning otherwise.
//!
//! Inside one schema object keywords run in a fixed order, with
//! `additionalProperties` before `properties` and `patternProperties`.
//! In fail-fast mode a schema stops at its first failing keyword.

use std::sync::Arc;

use propguard_core::{CompileError, ErrorKind, JsonPointer, ValidationError, ValidatorOptions};
use regex::Regex;
use serde_json::{Map, Value};

use crate::additional::AdditionalPropertiesValidator;
use crate::pattern::PatternCache;
use crate::sink::{ErrorSink, ValidationSession};

/// Keywords that never constrain a value.
const ANNOTATION_KEYWORDS: &[&str] = &[
    "$schema",
    "$id",
    "$comment",
    "$defs",
    "definitions",
    "title",
    "description",
    "default",
    "examples",
    "deprecated",
    "readOnly",
    "writeOnly",
];

/// Keywords this compiler implements.
const VALIDATION_KEYWORDS: &[&str] = &[
    "type",
    "enum",
    "const",
    "required",
    "minimum",
    "maximum",
    "minLength",
    "maxLength",
    "minProperties",
    "maxProperties",
    "items",
    "additionalProperties",
    "properties",
    "patternProperties",
];

/// JSON type names accepted by the `type` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    Integer,
    String,
}

impl JsonType {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "null" => Self::Null,
            "boolean" => Self::Boolean,
            "object" => Self::Object,
            "array" => Self::Array,
            "number" => Self::Number,
            "integer" => Self::Integer,
            "string" => Self::String,
            _ => return None,
        })
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::String => "string",
        }
    }

    fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Null, Value::Null) => true,
            (Self::Boolean, Value::Bool(_)) => true,
            (Self::Object, Value::Object(_)) => true,
            (Self::Array, Value::Array(_)) => true,
            (Self::Number, Value::Number(_)) => true,
            (Self::Integer, Value::Number(n)) => {
                n.is_i64() || n.is_u64() || n.as_f64().is_some_and(|f| f.fract() == 0.0)
            }
            (Self::String, Value::String(_)) => true,
            _ => false,
        }
    }
}

/// Name of the JSON type of `value`, for diagnostics.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON equality with numbers compared by value (`1 == 1.0`).
fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(xm), Value::Object(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).is_some_and(|y| json_equal(x, y)))
        }
        _ => a == b,
    }
}

#[derive(Debug)]
enum Check {
    Type(Vec<JsonType>),
    Enum(Vec<Value>),
    Const(Value),
    Required(Vec<String>),
    Minimum(f64),
    Maximum(f64),
    MinLength(u64),
    MaxLength(u64),
    MinProperties(u64),
    MaxProperties(u64),
    Items(Arc<CompiledSchema>),
    AdditionalProperties(AdditionalPropertiesValidator),
    Properties(Vec<(String, Arc<CompiledSchema>)>),
    PatternProperties(Vec<(Arc<Regex>, Arc<CompiledSchema>)>),
}

#[derive(Debug)]
struct Keyword {
    name: &'static str,
    schema_path: String,
    check: Check,
}

impl Keyword {
    fn apply(&self, instance: &mut Value, path: &JsonPointer, session: &mut ValidationSession<'_>) {
        match &self.check {
            Check::Type(types) => {
                if !types.iter().any(|t| t.matches(instance)) {
                    let expected = types.iter().map(|t| t.name().to_string()).collect();
                    self.record(session, ErrorKind::Type { expected }, path);
                }
            }
            Check::Enum(values) => {
                if !values.iter().any(|v| json_equal(v, instance)) {
                    self.record(session, ErrorKind::Enum, path);
                }
            }
            Check::Const(value) => {
                if !json_equal(value, instance) {
                    self.record(session, ErrorKind::Const, path);
                }
            }
            Check::Required(names) => {
                let Value::Object(map) = instance else { return };
                for name in names {
                    if !map.contains_key(name) {
                        let kind = ErrorKind::Required { property: name.clone() };
                        self.record(session, kind, path);
                        if !session.all_errors() {
                            break;
                        }
                    }
                }
            }
            Check::Minimum(limit) => {
                if instance.as_f64().is_some_and(|n| n < *limit) {
                    self.record(session, ErrorKind::Minimum { limit: *limit }, path);
                }
            }
            Check::Maximum(limit) => {
                if instance.as_f64().is_some_and(|n| n > *limit) {
                    self.record(session, ErrorKind::Maximum { limit: *limit }, path);
                }
            }
            Check::MinLength(limit) => {
                if let Value::String(s) = instance {
                    if (s.chars().count() as u64) < *limit {
                        self.record(session, ErrorKind::MinLength { limit: *limit }, path);
                    }
                }
            }
            Check::MaxLength(limit) => {
                if let Value::String(s) = instance {
                    if (s.chars().count() as u64) > *limit {
                        self.record(session, ErrorKind::MaxLength { limit: *limit }, path);
                    }
                }
            }
            Check::MinProperties(limit) => {
                if let Value::Object(map) = instance {
                    if (map.len() as u64) < *limit {
                        self.record(session, ErrorKind::MinProperties { limit: *limit }, path);
                    }
                }
            }
            Check::MaxProperties(limit) => {
                if let Value::Object(map) = instance {
                    if (map.len() as u64) > *limit {
                        self.record(session, ErrorKind::MaxProperties { limit: *limit }, path);
                    }
                }
            }
            Check::Items(schema) => {
                let Value::Array(items) = instance else { return };
                for (i, item) in items.iter_mut().enumerate() {
                    if !schema.validate(item, &path.index(i), session) && !session.all_errors() {
                        break;
                    }
                }
            }
            Check::AdditionalProperties(validator) => {
                if let Value::Object(map) = instance {
                    validator.validate(map, path, session);
                }
            }
            Check::Properties(properties) => {
                let Value::Object(map) = instance else { return };
                for (name, schema) in properties {
                    let Some(value) = map.get_mut(name) else { continue };
                    if !schema.validate(value, &path.child(name.as_str()), session)
                        && !session.all_errors()
                    {
                        break;
                    }
                }
            }
            Check::PatternProperties(patterns) => {
                let Value::Object(map) = instance else { return };
                let keys: Vec<String> = map.keys().cloned().collect();
                'keys: for key in keys {
                    for (re, schema) in patterns {
                        if !re.is_match(&key) {
                            continue;
                        }
                        let Some(value) = map.get_mut(&key) else { continue 'keys };
                        if !schema.validate(value, &path.child(key.as_str()), session)
                            && !session.all_errors()
                        {
                            break 'keys;
                        }
                    }
                }
            }
        }
    }

    fn record(&self, session: &mut ValidationSession<'_>, kind: ErrorKind, path: &JsonPointer) {
        session.record(ValidationError::new(kind, path.clone(), self.schema_path.clone()));
    }
}

#[derive(Debug)]
enum Body {
    Bool(bool),
    Keywords(Vec<Keyword>),
}

/// An immutable, compiled schema node.
#[derive(Debug)]
pub struct CompiledSchema {
    schema_path: String,
    body: Body,
}

impl CompiledSchema {
    /// Validate `instance`, located at `path`, recording errors into
    /// `session`. Returns true if no error was recorded.
    ///
    /// Strip policies below this node may remove keys from `instance`.
    pub fn validate(
        &self,
        instance: &mut Value,
        path: &JsonPointer,
        session: &mut ValidationSession<'_>,
    ) -> bool {
        let mark = session.mark();
        match &self.body {
            Body::Bool(true) => {}
            Body::Bool(false) => session.record(ValidationError::new(
                ErrorKind::FalseSchema,
                path.clone(),
                self.schema_path.clone(),
            )),
            Body::Keywords(keywords) => {
                for keyword in keywords {
                    keyword.apply(instance, path, session);
                    if !session.all_errors() && session.has_errors_since(mark) {
                        break;
                    }
                }
            }
        }
        !session.has_errors_since(mark)
    }

    /// Validate `instance` against a private scratch sink in fail-fast mode.
    /// Whatever errors the check produces are dropped.
    pub fn validate_isolated(&self, instance: &mut Value, path: &JsonPointer) -> bool {
        let mut scratch = ErrorSink::new();
        let mut session = ValidationSession::new(&mut scratch, false);
        self.validate(instance, path, &mut session)
    }

    /// Every compiled `additionalProperties` keyword in this tree, depth first.
    pub fn collect_additional_properties<'a>(&'a self, out: &mut Vec<&'a AdditionalPropertiesValidator>) {
        let Body::Keywords(keywords) = &self.body else { return };
        for keyword in keywords {
            match &keyword.check {
                Check::Items(schema) => schema.collect_additional_properties(out),
                Check::AdditionalProperties(v) => {
                    out.push(v);
                    if let Some(schema) = v.subschema() {
                        schema.collect_additional_properties(out);
                    }
                }
                Check::Properties(props) => {
                    for (_, schema) in props {
                        schema.collect_additional_properties(out);
                    }
                }
                Check::PatternProperties(pats) => {
                    for (_, schema) in pats {
                        schema.collect_additional_properties(out);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Compiles schema documents into [`CompiledSchema`] trees.
///
/// One compiler is used per schema document so that its [`PatternCache`]
/// is shared by every node in that document.
#[derive(Debug)]
pub struct SchemaCompiler {
    options: ValidatorOptions,
    patterns: PatternCache,
}

impl SchemaCompiler {
    /// Create a compiler with the given options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self {
            options,
            patterns: PatternCache::new(),
        }
    }

    /// Compile options.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Patterns compiled so far.
    pub fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Compile a root schema.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] for the first unusable keyword found.
    pub fn compile(&mut self, schema: &Value) -> Result<Arc<CompiledSchema>, CompileError> {
        self.compile_at(schema, &JsonPointer::root())
    }

    /// Compile the subschema located at `path`.
    pub fn compile_at(
        &mut self,
        schema: &Value,
        path: &JsonPointer,
    ) -> Result<Arc<CompiledSchema>, CompileError> {
        let compiled = match schema {
            Value::Bool(b) => CompiledSchema {
                schema_path: path.to_string(),
                body: Body::Bool(*b),
            },
            Value::Object(node) => self.compile_object(node, path)?,
            other => {
                return Err(CompileError::InvalidSchema {
                    schema_path: path.to_string(),
                    found: json_type_name(other).to_string(),
                })
            }
        };
        Ok(Arc::new(compiled))
    }

    /// Compiled matcher for `pattern`, shared with every other use of the
    /// same text in this document. `path` locates the `patternProperties`
    /// keyword for diagnostics.
    pub fn pattern(&mut self, pattern: &str, path: &JsonPointer) -> Result<Arc<Regex>, CompileError> {
        self.patterns
            .get_or_compile(pattern)
            .map_err(|e| CompileError::InvalidPattern {
                pattern: pattern.to_string(),
                schema_path: path.to_string(),
                reason: e.to_string(),
            })
    }

    /// Returns true if `schema` accepts every value without compiling it.
    ///
    /// That is `true`, or an object holding only annotation keywords (and,
    /// outside strict mode, keywords this compiler ignores).
    pub fn is_always_valid(&self, schema: &Value) -> bool {
        match schema {
            Value::Bool(b) => *b,
            Value::Object(node) => node.keys().all(|k| {
                ANNOTATION_KEYWORDS.contains(&k.as_str())
                    || (!self.options.strict && !VALIDATION_KEYWORDS.contains(&k.as_str()))
            }),
            _ => false,
        }
    }

    fn compile_object(
        &mut self,
        node: &Map<String, Value>,
        path: &JsonPointer,
    ) -> Result<CompiledSchema, CompileError> {
        for key in node.keys() {
            if ANNOTATION_KEYWORDS.contains(&key.as_str()) || VALIDATION_KEYWORDS.contains(&key.as_str()) {
                continue;
            }
            if self.options.strict {
                return Err(CompileError::UnknownKeyword {
                    keyword: key.clone(),
                    schema_path: path.to_string(),
                });
            }
            tracing::warn!(keyword = %key, schema_path = %path, "ignoring unknown keyword");
        }

        let mut keywords = Vec::new();
        let mut push = |name: &'static str, check: Check| {
            keywords.push(Keyword {
                name,
                schema_path: path.child(name).to_string(),
                check,
            });
        };

        if let Some(raw) = node.get("type") {
            push("type", Check::Type(parse_types(raw, path)?));
        }
        if let Some(raw) = node.get("enum") {
            let values = raw
                .as_array()
                .ok_or_else(|| invalid("enum", path, "expected an array"))?;
            push("enum", Check::Enum(values.clone()));
        }
        if let Some(raw) = node.get("const") {
            push("const", Check::Const(raw.clone()));
        }
        if let Some(raw) = node.get("required") {
            push("required", Check::Required(parse_string_array(raw, "required", path)?));
        }
        if let Some(raw) = node.get("minimum") {
            push("minimum", Check::Minimum(parse_number(raw, "minimum", path)?));
        }
        if let Some(raw) = node.get("maximum") {
            push("maximum", Check::Maximum(parse_number(raw, "maximum", path)?));
        }
        if let Some(raw) = node.get("minLength") {
            push("minLength", Check::MinLength(parse_count(raw, "minLength", path)?));
        }
        if let Some(raw) = node.get("maxLength") {
            push("maxLength", Check::MaxLength(parse_count(raw, "maxLength", path)?));
        }
        if let Some(raw) = node.get("minProperties") {
            push("minProperties", Check::MinProperties(parse_count(raw, "minProperties", path)?));
        }
        if let Some(raw) = node.get("maxProperties") {
            push("maxProperties", Check::MaxProperties(parse_count(raw, "maxProperties", path)?));
        }
        drop(push);

        if let Some(raw) = node.get("items") {
            if raw.is_array() {
                return Err(invalid("items", path, "tuple form is not supported"));
            }
            let schema = self.compile_at(raw, &path.child("items"))?;
            keywords.push(Keyword {
                name: "items",
                schema_path: path.child("items").to_string(),
                check: Check::Items(schema),
            });
        }

        if let Some(validator) = AdditionalPropertiesValidator::compile(self, node, path)? {
            keywords.push(Keyword {
                name: "additionalProperties",
                schema_path: validator.schema_path().to_string(),
                check: Check::AdditionalProperties(validator),
            });
        }

        if let Some(raw) = node.get("properties") {
            let map = raw
                .as_object()
                .ok_or_else(|| invalid("properties", path, "expected an object"))?;
            let props_path = path.child("properties");
            let mut properties = Vec::with_capacity(map.len());
            for (name, sub) in map {
                properties.push((name.clone(), self.compile_at(sub, &props_path.child(name.as_str()))?));
            }
            keywords.push(Keyword {
                name: "properties",
                schema_path: props_path.to_string(),
                check: Check::Properties(properties),
            });
        }

        if let Some(raw) = node.get("patternProperties") {
            let map = raw
                .as_object()
                .ok_or_else(|| invalid("patternProperties", path, "expected an object"))?;
            let pats_path = path.child("patternProperties");
            let mut patterns = Vec::with_capacity(map.len());
            for (pattern, sub) in map {
                let re = self.pattern(pattern, &pats_path)?;
                patterns.push((re, self.compile_at(sub, &pats_path.child(pattern.as_str()))?));
            }
            keywords.push(Keyword {
                name: "patternProperties",
                schema_path: pats_path.to_string(),
                check: Check::PatternProperties(patterns),
            });
        }

        tracing::trace!(
            schema_path = %path,
            keywords = ?keywords.iter().map(|k| k.name).collect::<Vec<_>>(),
            "compiled schema node"
        );
        Ok(CompiledSchema {
            schema_path: path.to_string(),
            body: Body::Keywords(keywords),
        })
    }
}

fn invalid(keyword: &str, path: &JsonPointer, reason: &str) -> CompileError {
    CompileError::InvalidKeyword {
        keyword: keyword.to_string(),
        schema_path: path.child(keyword).to_string(),
        reason: reason.to_string(),
    }
}

fn parse_types(raw: &Value, path: &JsonPointer) -> Result<Vec<JsonType>, CompileError> {
    let names: Vec<&str> = match raw {
        Value::String(s) => vec![s.as_str()],
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().ok_or_else(|| invalid("type", path, "expected type names")))
            .collect::<Result<_, _>>()?,
        _ => return Err(invalid("type", path, "expected a string or an array of strings")),
    };
    names
        .into_iter()
        .map(|n| {
            JsonType::from_name(n)
                .ok_or_else(|| invalid("type", path, &format!("unknown type '{n}'")))
        })
        .collect()
}

fn parse_string_array(raw: &Value, keyword: &str, path: &JsonPointer) -> Result<Vec<String>, CompileError> {
    raw.as_array()
        .and_then(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or_else(|| invalid(keyword, path, "expected an array of strings"))
}

fn parse_number(raw: &Value, keyword: &str, path: &JsonPointer) -> Result<f64, CompileError> {
    raw.as_f64()
        .ok_or_else(|| invalid(keyword, path, "expected a number"))
}

fn parse_count(raw: &Value, keyword: &str, path: &JsonPointer) -> Result<u64, CompileError> {
    raw.as_u64()
        .ok_or_else(|| invalid(keyword, path, "expected a non-negative integer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compile(schema: Value) -> Arc<CompiledSchema> {
        SchemaCompiler::new(ValidatorOptions::default())
            .compile(&schema)
            .unwrap()
    }

    fn keyword_names(schema: &CompiledSchema) -> Vec<&'static str> {
        match &schema.body {
            Body::Bool(_) => Vec::new(),
            Body::Keywords(keywords) => keywords.iter().map(|k| k.name).collect(),
        }
    }

    fn check(schema: &CompiledSchema, mut instance: Value, all_errors: bool) -> Vec<ValidationError> {
        let mut sink = ErrorSink::new();
        let mut session = ValidationSession::new(&mut sink, all_errors);
        schema.validate(&mut instance, &JsonPointer::root(), &mut session);
        sink.into_errors()
    }

    #[test]
    fn test_boolean_schemas() {
        assert!(check(&compile(json!(true)), json!(1), false).is_empty());
        let errors = check(&compile(json!(false)), json!(1), false);
        assert_eq!(errors[0].kind, ErrorKind::FalseSchema);
    }

    #[test]
    fn test_type_integer_accepts_whole_floats() {
        let schema = compile(json!({"type": "integer"}));
        assert!(check(&schema, json!(3), false).is_empty());
        assert!(check(&schema, json!(3.0), false).is_empty());
        assert_eq!(check(&schema, json!(3.5), false).len(), 1);
    }

    #[test]
    fn test_enum_compares_numbers_by_value() {
        let schema = compile(json!({"enum": [1, "a"]}));
        assert!(check(&schema, json!(1.0), false).is_empty());
        assert_eq!(check(&schema, json!("b"), false)[0].kind, ErrorKind::Enum);
    }

    #[test]
    fn test_required_fail_fast_and_collect_all() {
        let schema = compile(json!({"required": ["a", "b"]}));
        assert_eq!(check(&schema, json!({}), false).len(), 1);
        assert_eq!(check(&schema, json!({}), true).len(), 2);
    }

    #[test]
    fn test_length_counts_characters() {
        let schema = compile(json!({"maxLength": 2}));
        assert!(check(&schema, json!("éé"), false).is_empty());
        assert_eq!(check(&schema, json!("abc"), false).len(), 1);
    }

    #[test]
    fn test_fail_fast_stops_at_first_keyword() {
        let schema = compile(json!({"type": "string", "minLength": 5, "enum": ["x"]}));
        assert_eq!(check(&schema, json!(1), false).len(), 1);
        assert_eq!(check(&schema, json!(1), true).len(), 2);
    }

    #[test]
    fn test_items_paths() {
        let schema = compile(json!({"items": {"type": "number"}}));
        let errors = check(&schema, json!([1, "x", 2]), false);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].instance_path.to_string(), "/1");
        assert_eq!(errors[0].schema_path, "/items/type");
    }

    #[test]
    fn test_additional_properties_runs_before_properties() {
        let schema = compile(json!({
            "properties": {"a": {"type": "string"}},
            "additionalProperties": false
        }));
        assert_eq!(
            keyword_names(&schema),
            vec!["additionalProperties", "properties"]
        );
    }

    #[test]
    fn test_strict_rejects_unknown_keyword() {
        let err = SchemaCompiler::new(ValidatorOptions::default())
            .compile(&json!({"properties": {"a": {"format": "email"}}}))
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::UnknownKeyword {
                keyword: "format".into(),
                schema_path: "/properties/a".into(),
            }
        );
    }

    #[test]
    fn test_loose_mode_ignores_unknown_keyword() {
        let mut compiler = SchemaCompiler::new(ValidatorOptions::default().with_strict(false));
        let schema = compiler.compile(&json!({"format": "email"})).unwrap();
        assert!(keyword_names(&schema).is_empty());
        assert!(compiler.is_always_valid(&json!({"format": "email"})));
    }

    #[test]
    fn test_is_always_valid() {
        let compiler = SchemaCompiler::new(ValidatorOptions::default());
        assert!(compiler.is_always_valid(&json!(true)));
        assert!(compiler.is_always_valid(&json!({})));
        assert!(compiler.is_always_valid(&json!({"title": "t", "$comment": "c"})));
        assert!(!compiler.is_always_valid(&json!(false)));
        assert!(!compiler.is_always_valid(&json!({"type": "string"})));
        assert!(!compiler.is_always_valid(&json!({"format": "email"})));
    }

    #[test]
    fn test_invalid_pattern_is_compile_error() {
        let err = SchemaCompiler::new(ValidatorOptions::default())
            .compile(&json!({"patternProperties": {"(": {}}}))
            .unwrap_err();
        assert!(matches!(err, CompileError::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn test_pattern_compiled_once_per_document() {
        let mut compiler = SchemaCompiler::new(ValidatorOptions::default());
        compiler
            .compile(&json!({
                "patternProperties": {"^x": {}},
                "additionalProperties": false,
                "properties": {
                    "inner": {"patternProperties": {"^x": {}}, "additionalProperties": false}
                }
            }))
            .unwrap();
        assert_eq!(compiler.patterns().len(), 1);
    }

    #[test]
    fn test_bad_keyword_values() {
        let mut compiler = SchemaCompiler::new(ValidatorOptions::default());
        for schema in [
            json!({"type": "text"}),
            json!({"required": [1]}),
            json!({"minLength": -1}),
            json!({"items": [{}]}),
            json!({"properties": []}),
            json!({"enum": 1}),
        ] {
            assert!(
                matches!(compiler.compile(&schema), Err(CompileError::InvalidKeyword { .. })),
                "expected InvalidKeyword for {schema}"
            );
        }
        assert!(matches!(
            compiler.compile(&json!({"properties": {"a": 1}})),
            Err(CompileError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_compiled_schema_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CompiledSchema>();
    }
}
