//! # JSON Pointer Paths
//!
//! Instance and schema locations are tracked as RFC 6901 JSON Pointers.
//! Segments are stored unescaped and escaped (`~` → `~0`, `/` → `~1`) only
//! when rendered.

use std::fmt;

use serde::{Serialize, Serializer};

/// An RFC 6901 JSON Pointer, stored as a list of unescaped reference tokens.
///
/// The empty pointer refers to the whole document and renders as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    segments: Vec<String>,
}

impl JsonPointer {
    /// The pointer to the document root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new pointer with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    /// Returns a new pointer with the array index `index` appended.
    pub fn index(&self, index: usize) -> Self {
        self.child(index.to_string())
    }

    /// Returns true if this pointer refers to the document root.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The unescaped reference tokens.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Parse a rendered pointer such as `/properties/a~1b`.
    ///
    /// Returns `None` for non-empty input that does not start with `/`.
    pub fn parse(rendered: &str) -> Option<Self> {
        if rendered.is_empty() {
            return Some(Self::root());
        }
        let rest = rendered.strip_prefix('/')?;
        let segments = rest
            .split('/')
            .map(|s| s.replace("~1", "/").replace("~0", "~"))
            .collect();
        Some(Self { segments })
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
        }
        Ok(())
    }
}

impl Serialize for JsonPointer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
