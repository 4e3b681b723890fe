//! Fit-content: shrink a container to hug its in-flow children.

use crate::box_model::box_model;
use crate::driver::{ComputedStyles, NodePlan};
use crate::grid::cell_metrics;
use crate::props::Display;
use log::trace;
use scene::{NodeId, Scene};

/// Outer (margin-box) extents of one child.
fn outer_size(scene: &Scene, computed: &ComputedStyles, child: NodeId) -> (f32, f32) {
    let Some(node) = scene.get(child) else {
        return (0.0, 0.0);
    };
    let bm = computed.get(&child).map(|style| box_model(style)).unwrap_or_default();
    (bm.outer_width(node.width), bm.outer_height(node.height))
}

/// Resize `plan.node` to hug its in-flow children according to `display`.
pub(crate) fn apply_fit_content(scene: &mut Scene, computed: &ComputedStyles, plan: &NodePlan) {
    let Some(style) = computed.get(&plan.node) else {
        return;
    };
    let bm = box_model(style);
    let inset_h = bm.inset_horizontal();
    let inset_v = bm.inset_vertical();
    let count = plan.in_flow.len();

    let outer: Vec<(f32, f32)> = plan
        .in_flow
        .iter()
        .map(|&child| outer_size(scene, computed, child))
        .collect();
    let gaps = plan.props.gap * count.saturating_sub(1) as f32;

    let (width, height) = match plan.props.display {
        Display::Vertical => {
            let total_height: f32 = outer.iter().map(|(_, h)| h).sum();
            let max_width = outer.iter().map(|(w, _)| *w).fold(0.0, f32::max);
            (inset_h + max_width, inset_v + total_height + gaps)
        }
        Display::Horizontal => {
            let total_width: f32 = outer.iter().map(|(w, _)| w).sum();
            let max_height = outer.iter().map(|(_, h)| *h).fold(0.0, f32::max);
            (inset_h + total_width + gaps, inset_v + max_height)
        }
        Display::Grid => {
            if count == 0 {
                (inset_h, inset_v)
            } else {
                let columns = plan.props.columns.max(1);
                let items: Vec<crate::grid::GridItem> = plan
                    .in_flow
                    .iter()
                    .zip(outer.iter())
                    .map(|(&id, &(w, h))| crate::grid::GridItem {
                        id,
                        width: w,
                        height: h,
                        margin_top: 0.0,
                        margin_right: 0.0,
                        margin_bottom: 0.0,
                        margin_left: 0.0,
                        justify_self: None,
                        align_self: None,
                    })
                    .collect();
                let (cell_w, cell_h, rows) = cell_metrics(&items, columns);
                (
                    inset_h + columns as f32 * cell_w + (columns as f32 - 1.0) * plan.props.gap,
                    inset_v + rows as f32 * cell_h + (rows as f32 - 1.0) * plan.props.gap,
                )
            }
        }
    };

    trace!("fit-content {:?}: {width:.2} x {height:.2}", plan.node);
    if let Some(node) = scene.get_mut(plan.node) {
        node.width = width;
        node.height = height;
    }
}
