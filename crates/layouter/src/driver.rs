//! The tree driver: ordered layout phases over a node and its children.
//!
//! Phase order per node: style + explicit sizing, property view, child
//! partitioning, in-flow recursion, flow layout, fit-content (with percent
//! re-resolution), then out-of-flow recursion and positioning. Children must
//! be sized before their container can place them or shrink to fit;
//! out-of-flow children go last because they may depend on the container's
//! final size or a tag-resolved target.

use crate::absolute::position_absolute;
use crate::anchor::position_anchor;
use crate::box_model::box_model;
use crate::fit::apply_fit_content;
use crate::flow::{FlowAxis, FlowContainer, FlowItem, flex_factors, layout_flow};
use crate::grid::{GridContainer, GridItem, layout_grid};
use crate::percent;
use crate::props::{Display, LayoutProps, Position};
use log::{trace, warn};
use scene::{NodeId, Scene};
use style_engine::{StyleMap, StyleRegistry};
use std::collections::HashMap;

/// Per-pass computed-style scratch, keyed by node. Considered invalid at the
/// start of every pass; the driver rebuilds it from the registry and the
/// nodes' `classes`/`style` attributes.
pub type ComputedStyles = HashMap<NodeId, StyleMap>;

/// Everything phases 1-3 learned about one node.
pub(crate) struct NodePlan {
    pub node: NodeId,
    pub props: LayoutProps,
    pub in_flow: Vec<NodeId>,
    pub out_of_flow: Vec<NodeId>,
    /// Children requesting percentage width/height/flexBasis; re-sized in
    /// phase 6 after fit-content changes this node.
    pub percent_children: Vec<NodeId>,
    /// Whether any in-flow child carries flex properties.
    pub any_flex_child: bool,
}

/// Run one layout pass rooted at `root`, mutating geometry in place.
///
/// Returns the number of nodes visited. Unknown roots are a warning, not an
/// error: layout is silent best-effort.
pub fn process_instance(scene: &mut Scene, registry: &StyleRegistry, root: NodeId) -> usize {
    if !scene.contains(root) {
        warn!("process_instance: unknown node {root:?}");
        return 0;
    }
    let mut computed = ComputedStyles::new();
    layout_node(scene, registry, &mut computed, root)
}

fn layout_node(
    scene: &mut Scene,
    registry: &StyleRegistry,
    computed: &mut ComputedStyles,
    node: NodeId,
) -> usize {
    let plan = prepare(scene, registry, computed, node);
    let mut visited = 1usize;
    for index in 0..plan.in_flow.len() {
        visited += layout_node(scene, registry, computed, plan.in_flow[index]);
    }
    run_flow(scene, computed, &plan);
    run_fit(scene, computed, &plan);
    for index in 0..plan.out_of_flow.len() {
        let child = plan.out_of_flow[index];
        visited += layout_node(scene, registry, computed, child);
        position_out_of_flow(scene, computed, child);
    }
    visited
}

/// Compute and cache `node`'s style if this pass has not seen it yet.
pub(crate) fn ensure_style(
    scene: &Scene,
    registry: &StyleRegistry,
    computed: &mut ComputedStyles,
    node: NodeId,
) {
    if computed.contains_key(&node) {
        return;
    }
    let Some(node_ref) = scene.get(node) else {
        return;
    };
    let style = registry.computed_style(node_ref.classes(), node_ref.style_text());
    computed.insert(node, style);
}

/// Phases 1-2: style resolution, explicit/percentage sizing, property view.
/// A parentless node is treated as `position: relative` regardless of its
/// style.
pub(crate) fn apply_style_phase(
    scene: &mut Scene,
    registry: &StyleRegistry,
    computed: &mut ComputedStyles,
    node: NodeId,
) -> LayoutProps {
    ensure_style(scene, registry, computed, node);
    percent::apply_sizing(scene, computed, node);
    let mut props = match computed.get(&node) {
        Some(style) => LayoutProps::from_style(style),
        None => LayoutProps::from_style(&StyleMap::new()),
    };
    if scene.parent_of(node).is_none() {
        props.position = Position::Relative;
    }
    props
}

/// Phases 1-3 together: style, sizing, property view, partitioning.
pub(crate) fn prepare(
    scene: &mut Scene,
    registry: &StyleRegistry,
    computed: &mut ComputedStyles,
    node: NodeId,
) -> NodePlan {
    let props = apply_style_phase(scene, registry, computed, node);
    partition(scene, registry, computed, node, props)
}

/// Phase 3: partition children into in-flow and out-of-flow, caching each
/// survivor's style and recording percent-sized children.
pub(crate) fn partition(
    scene: &mut Scene,
    registry: &StyleRegistry,
    computed: &mut ComputedStyles,
    node: NodeId,
    props: LayoutProps,
) -> NodePlan {
    let mut plan = NodePlan {
        node,
        props,
        in_flow: Vec::new(),
        out_of_flow: Vec::new(),
        percent_children: Vec::new(),
        any_flex_child: false,
    };
    for child in scene.children_of(node) {
        let Some(child_node) = scene.get(child) else {
            continue;
        };
        if !child_node.is_visible() || !child_node.layout_enabled() {
            trace!("partition: skipping {child:?} (hidden or doLayout=false)");
            continue;
        }
        ensure_style(scene, registry, computed, child);
        let Some(child_style) = computed.get(&child) else {
            continue;
        };
        if percent::wants_percent(child_style) {
            plan.percent_children.push(child);
        }
        let position = match child_style.keyword("position") {
            Some("absolute") => Position::Absolute,
            Some("anchor") => Position::Anchor,
            _ => Position::Relative,
        };
        if position.is_in_flow() {
            if flex_factors(child_style).2 {
                plan.any_flex_child = true;
            }
            plan.in_flow.push(child);
        } else {
            plan.out_of_flow.push(child);
        }
    }
    plan
}

/// Phase 5: run the flow layouter over the in-flow children. Only containers
/// that declare `display` and are themselves in-flow lay their children out.
/// Returns whether a layout actually ran.
pub(crate) fn run_flow(scene: &mut Scene, computed: &ComputedStyles, plan: &NodePlan) -> bool {
    if !plan.props.display_declared || !plan.props.position.is_in_flow() {
        return false;
    }
    if plan.in_flow.is_empty() {
        return false;
    }
    match plan.props.display {
        Display::Vertical => apply_flow(scene, computed, plan, FlowAxis::Vertical),
        Display::Horizontal => apply_flow(scene, computed, plan, FlowAxis::Horizontal),
        Display::Grid => apply_grid(scene, computed, plan),
    }
    true
}

/// Phase 6: fit-content, then percent re-resolution or a flex re-run so
/// positions reflect the container's new size. Returns whether it applied.
pub(crate) fn run_fit(scene: &mut Scene, computed: &ComputedStyles, plan: &NodePlan) -> bool {
    if !plan.props.fit_content {
        return false;
    }
    apply_fit_content(scene, computed, plan);
    if !plan.percent_children.is_empty() {
        for &child in &plan.percent_children {
            percent::apply_sizing(scene, computed, child);
        }
        run_flow(scene, computed, plan);
    } else if plan.any_flex_child {
        run_flow(scene, computed, plan);
    }
    true
}

/// Phase 7 positioning for one out-of-flow child. Returns the child's
/// position mode for step labeling.
pub(crate) fn position_out_of_flow(
    scene: &mut Scene,
    computed: &ComputedStyles,
    child: NodeId,
) -> Position {
    let props = match computed.get(&child) {
        Some(style) => LayoutProps::from_style(style),
        None => LayoutProps::from_style(&StyleMap::new()),
    };
    match props.position {
        Position::Absolute => position_absolute(scene, computed, child, &props),
        Position::Anchor => position_anchor(scene, child, &props),
        Position::Relative => {}
    }
    props.position
}

fn apply_flow(scene: &mut Scene, computed: &ComputedStyles, plan: &NodePlan, axis: FlowAxis) {
    let Some(node_ref) = scene.get(plan.node) else {
        return;
    };
    let bm = computed
        .get(&plan.node)
        .map(|style| box_model(style))
        .unwrap_or_default();
    let container = match axis {
        FlowAxis::Vertical => FlowContainer {
            main_origin: node_ref.y,
            cross_origin: node_ref.x,
            main_size: node_ref.height,
            cross_size: node_ref.width,
            inset_main_start: bm.padding.top + bm.border.top,
            inset_main_end: bm.padding.bottom + bm.border.bottom,
            inset_cross_start: bm.padding.left + bm.border.left,
            inset_cross_end: bm.padding.right + bm.border.right,
            gap: plan.props.gap,
            align_items: plan.props.align_items,
            justify_content: plan.props.justify_content,
        },
        FlowAxis::Horizontal => FlowContainer {
            main_origin: node_ref.x,
            cross_origin: node_ref.y,
            main_size: node_ref.width,
            cross_size: node_ref.height,
            inset_main_start: bm.padding.left + bm.border.left,
            inset_main_end: bm.padding.right + bm.border.right,
            inset_cross_start: bm.padding.top + bm.border.top,
            inset_cross_end: bm.padding.bottom + bm.border.bottom,
            gap: plan.props.gap,
            align_items: plan.props.align_items,
            justify_content: plan.props.justify_content,
        },
    };
    let content_main = container.content_main();

    let mut items = Vec::with_capacity(plan.in_flow.len());
    for &child in &plan.in_flow {
        let Some(child_node) = scene.get(child) else {
            continue;
        };
        let Some(child_style) = computed.get(&child) else {
            continue;
        };
        let child_bm = box_model(child_style);
        let (grow, shrink, is_flex) = flex_factors(child_style);
        let item = match axis {
            FlowAxis::Vertical => FlowItem {
                id: child,
                main_size: child_node.height,
                cross_size: child_node.width,
                margin_main_start: child_bm.margin.top,
                margin_main_end: child_bm.margin.bottom,
                margin_cross_start: child_bm.margin.left,
                margin_cross_end: child_bm.margin.right,
                grow,
                shrink,
                base_size: if is_flex {
                    percent::resolve_basis(child_style, content_main)
                        .unwrap_or(child_node.height)
                } else {
                    child_node.height
                },
                is_flex,
                min_main: child_style.number("minHeight"),
                max_main: child_style.number("maxHeight"),
                align_self: LayoutProps::align_self(child_style),
            },
            FlowAxis::Horizontal => FlowItem {
                id: child,
                main_size: child_node.width,
                cross_size: child_node.height,
                margin_main_start: child_bm.margin.left,
                margin_main_end: child_bm.margin.right,
                margin_cross_start: child_bm.margin.top,
                margin_cross_end: child_bm.margin.bottom,
                grow,
                shrink,
                base_size: if is_flex {
                    percent::resolve_basis(child_style, content_main)
                        .unwrap_or(child_node.width)
                } else {
                    child_node.width
                },
                is_flex,
                min_main: child_style.number("minWidth"),
                max_main: child_style.number("maxWidth"),
                align_self: LayoutProps::align_self(child_style),
            },
        };
        items.push(item);
    }

    for placement in layout_flow(&container, &items) {
        if let Some(child_node) = scene.get_mut(placement.id) {
            match axis {
                FlowAxis::Vertical => {
                    child_node.y = placement.main_pos;
                    child_node.x = placement.cross_pos;
                    child_node.height = placement.main_size;
                }
                FlowAxis::Horizontal => {
                    child_node.x = placement.main_pos;
                    child_node.y = placement.cross_pos;
                    child_node.width = placement.main_size;
                }
            }
        }
    }
}

fn apply_grid(scene: &mut Scene, computed: &ComputedStyles, plan: &NodePlan) {
    let Some(node_ref) = scene.get(plan.node) else {
        return;
    };
    let bm = computed
        .get(&plan.node)
        .map(|style| box_model(style))
        .unwrap_or_default();
    let container = GridContainer {
        origin_x: node_ref.x,
        origin_y: node_ref.y,
        width: node_ref.width,
        inset_left: bm.padding.left + bm.border.left,
        inset_right: bm.padding.right + bm.border.right,
        inset_top: bm.padding.top + bm.border.top,
        columns: plan.props.columns,
        gap: plan.props.gap,
        justify_content: plan.props.justify_content,
        align_items: plan.props.align_items,
    };
    let mut items = Vec::with_capacity(plan.in_flow.len());
    for &child in &plan.in_flow {
        let Some(child_node) = scene.get(child) else {
            continue;
        };
        let Some(child_style) = computed.get(&child) else {
            continue;
        };
        let child_bm = box_model(child_style);
        items.push(GridItem {
            id: child,
            width: child_node.width,
            height: child_node.height,
            margin_top: child_bm.margin.top,
            margin_right: child_bm.margin.right,
            margin_bottom: child_bm.margin.bottom,
            margin_left: child_bm.margin.left,
            justify_self: LayoutProps::justify_self(child_style),
            align_self: LayoutProps::align_self(child_style),
        });
    }
    for placement in layout_grid(&container, &items) {
        if let Some(child_node) = scene.get_mut(placement.id) {
            child_node.x = placement.x;
            child_node.y = placement.y;
        }
    }
}
