//! Absolute positioning inside the parent's border-inner rectangle.

use crate::box_model::box_model;
use crate::driver::ComputedStyles;
use crate::props::LayoutProps;
use log::trace;
use scene::{NodeId, Scene};

/// Position an `absolute` child from its `top`/`right`/`bottom`/`left`
/// offsets. Without a parent this is a no-op and geometry stays untouched.
pub(crate) fn position_absolute(
    scene: &mut Scene,
    computed: &ComputedStyles,
    child: NodeId,
    props: &LayoutProps,
) {
    let Some(parent) = scene.parent_of(child) else {
        trace!("absolute: {child:?} has no parent, skipping");
        return;
    };
    let parent_border = computed
        .get(&parent)
        .map(|style| box_model(style).border)
        .unwrap_or_default();
    let Some(parent_node) = scene.get(parent) else {
        return;
    };
    let inner_left = parent_node.x + parent_border.left;
    let inner_top = parent_node.y + parent_border.top;
    let inner_right = parent_node.x + parent_node.width - parent_border.right;
    let inner_bottom = parent_node.y + parent_node.height - parent_border.bottom;

    let margin = computed
        .get(&child)
        .map(|style| box_model(style).margin)
        .unwrap_or_default();
    let Some(child_node) = scene.get(child) else {
        return;
    };
    let (width, height) = (child_node.width, child_node.height);

    let x = if let Some(left) = props.left {
        inner_left + left + margin.left
    } else if let Some(right) = props.right {
        inner_right - right - width - margin.right
    } else {
        inner_left + margin.left
    };
    let y = if let Some(top) = props.top {
        inner_top + top + margin.top
    } else if let Some(bottom) = props.bottom {
        inner_bottom - bottom - height - margin.bottom
    } else {
        inner_top + margin.top
    };

    if let Some(child_node) = scene.get_mut(child) {
        child_node.x = x;
        child_node.y = y;
    }
}
