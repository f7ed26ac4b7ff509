//! # Pattern Cache
//!
//! `patternProperties` keys are compiled to [`Regex`] matchers once per
//! schema document. Identical pattern text anywhere in the document maps to
//! the same shared matcher, so a pattern used by both `patternProperties`
//! and `additionalProperties` classification on the same node (or on any
//! other node) is compiled exactly once.
//!
//! Matching is unanchored search (`is_match`): `"^x"` matches `"x1"`, and
//! `"x"` matches `"ax"`.
//!
//! Pattern text is ECMA-262 syntax with the `u` flag. Before compiling, the
//! shorthand classes the two dialects disagree on are rewritten to their
//! ASCII ECMAScript meaning: `\d` is `[0-9]`, `\w` is `[0-9A-Za-z_]`, and
//! `\b` / `\B` are ASCII word boundaries. An unescaped `[` inside a class is
//! a literal in ECMAScript and is escaped accordingly.

use std::collections::HashMap;
use std::sync::Arc;

use regex::Regex;

/// Cache of compiled patterns keyed by pattern text.
///
/// Written only while a schema is being compiled; the matchers it hands out
/// are immutable and shared by every validation afterwards.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Arc<Regex>>,
}

impl PatternCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the matcher for `pattern`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns the regex compiler's error if `pattern` is not a valid
    /// regular expression. Failed patterns are not cached.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<Arc<Regex>, regex::Error> {
        if let Some(existing) = self.patterns.get(pattern) {
            return Ok(Arc::clone(existing));
        }
        let compiled = Arc::new(Regex::new(&translate_ecma(pattern))?);
        self.patterns
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }

    /// Number of distinct patterns compiled so far.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if no pattern has been compiled.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

const ASCII_DIGIT: &str = "0-9";
const ASCII_WORD: &str = "0-9A-Za-z_";

/// Rewrite ECMAScript pattern text into `regex` syntax with the same
/// meaning for shorthand classes and word boundaries.
fn translate_ecma(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut in_class = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push('\\');
                    break;
                };
                match (next, in_class) {
                    ('d', false) => out.push_str("[0-9]"),
                    ('D', false) => out.push_str("[^0-9]"),
                    ('w', false) => out.push_str("[0-9A-Za-z_]"),
                    ('W', false) => out.push_str("[^0-9A-Za-z_]"),
                    ('b', false) => out.push_str("(?-u:\\b)"),
                    ('B', false) => out.push_str("(?-u:\\B)"),
                    ('d', true) => out.push_str(ASCII_DIGIT),
                    ('w', true) => out.push_str(ASCII_WORD),
                    ('D', true) => out.push_str("[^0-9]"),
                    ('W', true) => out.push_str("[^0-9A-Za-z_]"),
                    ('b', true) => out.push_str("\\x08"),
                    (other, _) => {
                        out.push('\\');
                        out.push(other);
                    }
                }
            }
            // Class-set operators (`&&`, `~~`) and nesting do not exist in
            // ECMAScript classes.
            '[' | '&' | '~' if in_class => {
                out.push('\\');
                out.push(c);
            }
            '[' => {
                in_class = true;
                out.push('[');
            }
            ']' if in_class => {
                in_class = false;
                out.push(']');
            }
            other => out.push(other),
        }
    }
    out
}
