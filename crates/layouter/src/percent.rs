//! Explicit and percentage sizing applied outside flow layout.
//!
//! Runs once per node before its children are visited, and again for
//! percent-sized children after fit-content changes their parent.

use crate::box_model::box_model;
use crate::driver::ComputedStyles;
use crate::props::clamp_size;
use scene::{NodeId, Scene};
use style_engine::{StyleMap, parse_percentage};

#[derive(Clone, Copy)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Percentage requested for an axis, from the dedicated `percentWidth` /
/// `percentHeight` property or a `%` string on `width` / `height`.
fn percent_for(style: &StyleMap, percent_key: &str, size_key: &str) -> Option<f32> {
    if let Some(value) = style.number(percent_key) {
        return Some(value);
    }
    style.keyword(size_key).and_then(parse_percentage)
}

/// Content-box extent of `node` on an axis: size minus padding and border on
/// both sides, floored at zero so percentages of a degenerate box resolve
/// to 0.
fn content_extent(scene: &Scene, computed: &ComputedStyles, node: NodeId, axis: Axis) -> f32 {
    let Some(node_ref) = scene.get(node) else {
        return 0.0;
    };
    let bm = computed.get(&node).map(|style| box_model(style)).unwrap_or_default();
    let extent = match axis {
        Axis::Horizontal => node_ref.width - bm.inset_horizontal(),
        Axis::Vertical => node_ref.height - bm.inset_vertical(),
    };
    extent.max(0.0)
}

/// Does this style request percentage sizing on width, height, or flex basis?
pub(crate) fn wants_percent(style: &StyleMap) -> bool {
    percent_for(style, "percentWidth", "width").is_some()
        || percent_for(style, "percentHeight", "height").is_some()
        || style.keyword("flexBasis").and_then(parse_percentage).is_some()
}

/// Resolve a percentage `flexBasis` against the parent's main-axis content
/// box (`content_main` of the flow container at classification time).
pub(crate) fn resolve_basis(style: &StyleMap, content_main: f32) -> Option<f32> {
    match style.get("flexBasis")? {
        style_engine::StyleValue::Number(basis) => Some(*basis),
        style_engine::StyleValue::Keyword(keyword) => {
            parse_percentage(keyword).map(|pct| content_main.max(0.0) * pct / 100.0)
        }
    }
}

/// Phase-1 sizing side effects for one node, in order: percentage
/// width/height against the parent's content box, explicit numeric
/// width/height, then the min/max clamp (min wins).
pub(crate) fn apply_sizing(scene: &mut Scene, computed: &ComputedStyles, node: NodeId) {
    let Some(style) = computed.get(&node) else {
        return;
    };
    let parent = scene.parent_of(node);

    let mut width = scene.get(node).map(|n| n.width).unwrap_or(0.0);
    let mut height = scene.get(node).map(|n| n.height).unwrap_or(0.0);

    if let (Some(pct), Some(parent)) = (percent_for(style, "percentWidth", "width"), parent) {
        width = content_extent(scene, computed, parent, Axis::Horizontal) * pct / 100.0;
    }
    if let (Some(pct), Some(parent)) = (percent_for(style, "percentHeight", "height"), parent) {
        height = content_extent(scene, computed, parent, Axis::Vertical) * pct / 100.0;
    }

    if let Some(explicit) = style.number("width") {
        width = explicit;
    }
    if let Some(explicit) = style.number("height") {
        height = explicit;
    }

    width = clamp_size(width, style.number("minWidth"), style.number("maxWidth"));
    height = clamp_size(height, style.number("minHeight"), style.number("maxHeight"));

    if let Some(node_ref) = scene.get_mut(node) {
        node_ref.width = width;
        node_ref.height = height;
    }
}
