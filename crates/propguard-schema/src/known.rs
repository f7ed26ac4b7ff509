//! # Known-Key Classification
//!
//! An object key is *known* if it equals a name declared in `properties` or
//! matches a pattern declared in `patternProperties`; otherwise it is
//! *additional*. The classifier is built once per schema node.
//!
//! Name membership uses one of two strategies, chosen at compile time from
//! the declared-name count:
//!
//! - [`NameStrategy::Branches`]: up to the threshold, the key is compared
//!   with each name in turn. No setup, O(n) per key.
//! - [`NameStrategy::Lookup`]: above the threshold, a hash set is built
//!   once and each key costs one lookup.
//!
//! Both strategies classify every key identically.

use std::collections::HashSet;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;

/// How declared property names are tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NameStrategy {
    /// No names declared.
    None,
    /// Equality test against each declared name.
    Branches,
    /// Single hash-set lookup.
    Lookup,
}

#[derive(Debug)]
enum NameTest {
    None,
    Branches(Box<[String]>),
    Lookup(HashSet<String>),
}

/// Compiled known-key classifier for one schema node.
#[derive(Debug)]
pub struct KnownKeys {
    names: NameTest,
    patterns: Box<[Arc<Regex>]>,
}

impl KnownKeys {
    /// Build a classifier from declared names and compiled patterns.
    ///
    /// More than `lookup_threshold` names selects [`NameStrategy::Lookup`].
    pub fn new(
        names: impl IntoIterator<Item = String>,
        patterns: Vec<Arc<Regex>>,
        lookup_threshold: usize,
    ) -> Self {
        let names: Vec<String> = names.into_iter().collect();
        let names = if names.is_empty() {
            NameTest::None
        } else if names.len() > lookup_threshold {
            NameTest::Lookup(names.into_iter().collect())
        } else {
            NameTest::Branches(names.into_boxed_slice())
        };
        Self {
            names,
            patterns: patterns.into_boxed_slice(),
        }
    }

    /// Returns true if nothing is declared, so every key is additional.
    pub fn is_empty(&self) -> bool {
        matches!(self.names, NameTest::None) && self.patterns.is_empty()
    }

    /// Returns true if `key` matches no declared name and no pattern.
    pub fn is_additional(&self, key: &str) -> bool {
        !(self.is_declared_name(key) || self.matches_pattern(key))
    }

    fn is_declared_name(&self, key: &str) -> bool {
        match &self.names {
            NameTest::None => false,
            NameTest::Branches(names) => names.iter().any(|n| n == key),
            NameTest::Lookup(set) => set.contains(key),
        }
    }

    // Any match suffices; patterns carry no precedence.
    fn matches_pattern(&self, key: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(key))
    }

    /// The name strategy chosen at compile time.
    pub fn name_strategy(&self) -> NameStrategy {
        match self.names {
            NameTest::None => NameStrategy::None,
            NameTest::Branches(_) => NameStrategy::Branches,
            NameTest::Lookup(_) => NameStrategy::Lookup,
        }
    }

    /// Number of distinct declared names.
    pub fn name_count(&self) -> usize {
        match &self.names {
            NameTest::None => 0,
            NameTest::Branches(names) => names.len(),
            NameTest::Lookup(set) => set.len(),
        }
    }

    /// Number of declared patterns.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}
