//! Named style classes and the per-node cascade.

use crate::cascade::StyleMap;
use crate::parser::parse_style_block;
use log::debug;
use std::collections::HashMap;

/// Registry of named style classes.
///
/// Registration is one-way: classes are parsed once and kept for the
/// lifetime of the engine; re-registering a name overwrites it.
#[derive(Debug, Default)]
pub struct StyleRegistry {
    classes: HashMap<String, StyleMap>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` once and store it under `name`.
    pub fn register(&mut self, name: &str, text: &str) {
        let parsed = parse_style_block(text);
        debug!("registered style class {name:?} ({} properties)", parsed.len());
        self.classes.insert(name.to_owned(), parsed);
    }

    pub fn class(&self, name: &str) -> Option<&StyleMap> {
        self.classes.get(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Cascade a node's style sources into one computed map.
    ///
    /// Class styles merge in list order (unknown names are skipped), then
    /// the inline block. The [`StyleMap`] write rule resolves `!important`.
    pub fn computed_style(&self, classes_attr: &str, inline_text: &str) -> StyleMap {
        let mut computed = StyleMap::new();
        for name in classes_attr.split_whitespace() {
            match self.classes.get(name) {
                Some(class_style) => computed.merge_from(class_style),
                None => debug!("skipping unknown style class {name:?}"),
            }
        }
        if !inline_text.is_empty() {
            let inline = parse_style_block(inline_text);
            computed.merge_from(&inline);
        }
        computed
    }
}
