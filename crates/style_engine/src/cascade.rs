//! Importance-aware property bags and their merge rule.

use crate::value::StyleValue;
use std::collections::{HashMap, HashSet};

/// An open bag of style properties keyed by camelCase name, with a side set
/// of properties flagged `!important`.
///
/// Unknown properties survive untouched; the layout engine only reads the
/// subset it recognizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    values: HashMap<String, StyleValue>,
    important: HashSet<String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.values.get(key)
    }

    pub fn number(&self, key: &str) -> Option<f32> {
        self.values.get(key).and_then(StyleValue::as_number)
    }

    pub fn keyword(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(StyleValue::as_keyword)
    }

    pub fn is_important(&self, key: &str) -> bool {
        self.important.contains(key)
    }

    /// Write one property through the cascade rule.
    ///
    /// A non-important write loses to an existing important value. An
    /// important write always lands and keeps the property important, so
    /// between two competing importants the later one wins.
    pub fn set(&mut self, key: &str, value: StyleValue, important: bool) {
        if !important && self.important.contains(key) {
            return;
        }
        self.values.insert(key.to_owned(), value);
        if important {
            self.important.insert(key.to_owned());
        }
    }

    /// Replay every entry of `other` through [`StyleMap::set`].
    pub fn merge_from(&mut self, other: &StyleMap) {
        for (key, value) in &other.values {
            self.set(key, value.clone(), other.important.contains(key));
        }
    }

    /// Properties and rendered values, sorted by name. Used by the debug
    /// driver's snapshots.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .values
            .iter()
            .map(|(key, value)| (key.clone(), value.to_text()))
            .collect();
        out.sort();
        out
    }
}
