//! Style text parsing and cascade for the trellis layout engine.
//!
//! Styles arrive as CSS-like text blocks, one declaration per line. Parsed
//! blocks become [`StyleMap`]s: open property bags whose write rule honors
//! `!important`. Named blocks live in a [`StyleRegistry`]; a node's computed
//! style is the ordered merge of its class styles followed by its inline
//! style.

mod cascade;
mod parser;
mod registry;
mod value;

pub use cascade::StyleMap;
pub use parser::{camel_case, parse_style_block};
pub use registry::StyleRegistry;
pub use value::{StyleValue, coerce_value, parse_percentage};
