//! Per-side margin, padding, and border widths.
//!
//! Border-box semantics: border and padding live inside a node's
//! `width`/`height`; margins live outside.

use style_engine::StyleMap;

/// Four edge values (top, right, bottom, left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Resolved box edges for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxModel {
    pub margin: Edges,
    pub padding: Edges,
    pub border: Edges,
}

impl BoxModel {
    /// Margin-box width for a node of the given border-box width.
    pub fn outer_width(&self, width: f32) -> f32 {
        width + self.margin.horizontal()
    }

    /// Margin-box height for a node of the given border-box height.
    pub fn outer_height(&self, height: f32) -> f32 {
        height + self.margin.vertical()
    }

    /// Combined padding + border inset on the horizontal axis.
    pub fn inset_horizontal(&self) -> f32 {
        self.padding.horizontal() + self.border.horizontal()
    }

    /// Combined padding + border inset on the vertical axis.
    pub fn inset_vertical(&self) -> f32 {
        self.padding.vertical() + self.border.vertical()
    }
}

/// First numeric value among `keys`, else 0. Keyword values count as absent.
fn side(style: &StyleMap, keys: &[&str]) -> f32 {
    keys.iter().find_map(|key| style.number(key)).unwrap_or(0.0)
}

/// Resolve the box model from a computed style.
///
/// Each side falls back from its specific property to the shorthand:
/// `marginTop` → `margin`, `paddingLeft` → `padding`, and for borders
/// `borderTopWidth` → `borderWidth` → `border`.
pub fn box_model(style: &StyleMap) -> BoxModel {
    BoxModel {
        margin: Edges {
            top: side(style, &["marginTop", "margin"]),
            right: side(style, &["marginRight", "margin"]),
            bottom: side(style, &["marginBottom", "margin"]),
            left: side(style, &["marginLeft", "margin"]),
        },
        padding: Edges {
            top: side(style, &["paddingTop", "padding"]),
            right: side(style, &["paddingRight", "padding"]),
            bottom: side(style, &["paddingBottom", "padding"]),
            left: side(style, &["paddingLeft", "padding"]),
        },
        border: Edges {
            top: side(style, &["borderTopWidth", "borderWidth", "border"]),
            right: side(style, &["borderRightWidth", "borderWidth", "border"]),
            bottom: side(style, &["borderBottomWidth", "borderWidth", "border"]),
            left: side(style, &["borderLeftWidth", "borderWidth", "border"]),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use style_engine::parse_style_block;

    #[test]
    fn shorthand_fills_all_sides() {
        let bm = box_model(&parse_style_block("margin: 5\npadding: 10\nborder: 2"));
        assert_eq!(bm.margin.top, 5.0);
        assert_eq!(bm.margin.left, 5.0);
        assert_eq!(bm.padding.horizontal(), 20.0);
        assert_eq!(bm.border.vertical(), 4.0);
    }

    #[test]
    fn specific_side_overrides_shorthand() {
        let bm = box_model(&parse_style_block("margin: 5\nmargin-left: 12"));
        assert_eq!(bm.margin.left, 12.0);
        assert_eq!(bm.margin.right, 5.0);
    }

    #[test]
    fn border_width_chain() {
        let bm = box_model(&parse_style_block("border: 1\nborderWidth: 3\nborder-top-width: 7"));
        assert_eq!(bm.border.top, 7.0);
        assert_eq!(bm.border.left, 3.0);
    }

    #[test]
    fn outer_sizes_add_margins() {
        let bm = box_model(&parse_style_block("margin: 5"));
        assert_eq!(bm.outer_width(200.0), 210.0);
        assert_eq!(bm.outer_height(80.0), 90.0);
    }
}
