//! # Document Loading
//!
//! Reads JSON or YAML documents (format chosen by file extension) into
//! `serde_json::Value`, and writes sanitized documents back in the format
//! they were read in.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

/// On-disk format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// `.json` and anything unrecognized.
    Json,
    /// `.yaml` / `.yml`.
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()).unwrap_or("") {
            "yaml" | "yml" => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Load a document, returning its value and format.
pub fn load_document(path: &Path) -> Result<(Value, DocumentFormat)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let format = DocumentFormat::from_path(path);
    let value = parse_document(&content, format)
        .with_context(|| format!("cannot parse {}", path.display()))?;
    Ok((value, format))
}

/// Parse document text in the given format.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value> {
    match format {
        DocumentFormat::Json => Ok(serde_json::from_str(content)?),
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
            yaml_to_json_value(&yaml)
        }
    }
}

/// Render a document in the given format.
pub fn render_document(value: &Value, format: DocumentFormat) -> Result<String> {
    Ok(match format {
        DocumentFormat::Json => {
            let mut s = serde_json::to_string_pretty(value)?;
            s.push('\n');
            s
        }
        DocumentFormat::Yaml => serde_yaml::to_string(value)?,
    })
}

/// Overwrite `path` with `value` rendered in `format`.
pub fn write_document(path: &Path, value: &Value, format: DocumentFormat) -> Result<()> {
    let rendered = render_document(value, format)?;
    std::fs::write(path, rendered).with_context(|| format!("cannot write {}", path.display()))
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Scalar map keys are stringified; tags are dropped.
fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value> {
    Ok(match yaml {
        serde_yaml::Value::Null => Value::Null,
        serde_yaml::Value::Bool(b) => Value::Bool(*b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else if let Some(f) = n.as_f64() {
                match serde_json::Number::from_f64(f) {
                    Some(num) => Value::Number(num),
                    None => bail!("cannot represent float {f} in JSON"),
                }
            } else {
                bail!("unsupported YAML number: {n:?}")
            }
        }
        serde_yaml::Value::String(s) => Value::String(s.clone()),
        serde_yaml::Value::Sequence(seq) => {
            Value::Array(seq.iter().map(yaml_to_json_value).collect::<Result<_>>()?)
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => bail!("unsupported YAML map key: {other:?}"),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Value::Object(json_map)
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value)?,
    })
}
