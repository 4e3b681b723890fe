//! Line-oriented style block parsing.
//!
//! One declaration per line: `property: value`, optional trailing `;`,
//! optional `!important` suffix. Invalid lines are dropped; parsing never
//! fails.

use crate::cascade::StyleMap;
use crate::value::{StyleValue, coerce_value};
use log::trace;

const IMPORTANT_SUFFIX: &str = "!important";

/// Normalize a property name from kebab-case to camelCase.
///
/// Names already in camelCase pass through unchanged.
pub fn camel_case(name: &str) -> String {
    if !name.contains('-') {
        return name.to_owned();
    }
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for character in name.chars() {
        if character == '-' {
            upper_next = true;
        } else if upper_next {
            out.extend(character.to_uppercase());
            upper_next = false;
        } else {
            out.push(character);
        }
    }
    out
}

/// Parse a multi-line style block into a [`StyleMap`].
pub fn parse_style_block(text: &str) -> StyleMap {
    let mut map = StyleMap::new();
    for raw_line in text.lines() {
        let line = raw_line.trim().trim_end_matches(';').trim_end();
        if line.is_empty() {
            continue;
        }
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            trace!("dropping declaration without colon: {line:?}");
            continue;
        };
        let mut value = raw_value.trim();
        let mut important = false;
        if let Some(stripped) = value.strip_suffix(IMPORTANT_SUFFIX) {
            value = stripped.trim_end();
            important = true;
        }
        let key = camel_case(raw_key.trim());
        if key.is_empty() || value.is_empty() {
            trace!("dropping malformed declaration: {line:?}");
            continue;
        }
        if key == "flex" {
            expand_flex_shorthand(&mut map, value, important);
        } else {
            map.set(&key, coerce_value(value), important);
        }
    }
    map
}

/// Expand the `flex` shorthand into `flexGrow` / `flexShrink` / `flexBasis`.
fn expand_flex_shorthand(map: &mut StyleMap, value: &str, important: bool) {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let (grow, shrink, basis) = match tokens.as_slice() {
        ["auto"] => (
            StyleValue::Number(1.0),
            StyleValue::Number(1.0),
            StyleValue::Keyword("auto".into()),
        ),
        ["none"] => (
            StyleValue::Number(0.0),
            StyleValue::Number(0.0),
            StyleValue::Keyword("auto".into()),
        ),
        ["initial"] => (
            StyleValue::Number(0.0),
            StyleValue::Number(1.0),
            StyleValue::Keyword("auto".into()),
        ),
        [single] => (
            coerce_value(single),
            StyleValue::Number(1.0),
            StyleValue::Number(0.0),
        ),
        [first, second] => {
            let grow = coerce_value(first);
            match coerce_value(second) {
                StyleValue::Number(shrink) => (
                    grow,
                    StyleValue::Number(shrink),
                    StyleValue::Number(0.0),
                ),
                basis @ StyleValue::Keyword(_) => (grow, StyleValue::Number(1.0), basis),
            }
        }
        [first, second, third, ..] => (
            coerce_value(first),
            coerce_value(second),
            coerce_value(third),
        ),
        [] => return,
    };
    map.set("flexGrow", grow, important);
    map.set("flexShrink", shrink, important);
    map.set("flexBasis", basis, important);
}
