//! Anchor positioning: pin a point on this node to a point on a target.

use crate::props::{AnchorTarget, LayoutProps};
use log::trace;
use scene::{NodeId, Scene};

/// Resolve the anchor target: the parent by default, a tag lookup across the
/// whole scene, or a raw node handle.
fn resolve_target(scene: &Scene, child: NodeId, props: &LayoutProps) -> Option<NodeId> {
    match &props.anchor_target {
        None | Some(AnchorTarget::Parent) => scene.parent_of(child),
        Some(AnchorTarget::Tag(tag)) => scene.find_by_tag(tag),
        Some(AnchorTarget::Node(id)) => scene.contains(*id).then_some(*id),
    }
}

/// Translate `child` so its `selfAnchor` point coincides with the target's
/// `anchorPoint` plus the configured offset. Unresolvable targets leave the
/// geometry untouched.
pub(crate) fn position_anchor(scene: &mut Scene, child: NodeId, props: &LayoutProps) {
    let Some(target) = resolve_target(scene, child, props) else {
        trace!("anchor: no target for {child:?}, skipping");
        return;
    };
    let Some(target_node) = scene.get(target) else {
        return;
    };
    let (target_dx, target_dy) = props
        .anchor_point
        .offset(target_node.width, target_node.height);
    let anchor_x = target_node.x + target_dx + props.anchor_offset_x;
    let anchor_y = target_node.y + target_dy + props.anchor_offset_y;

    let Some(child_node) = scene.get(child) else {
        return;
    };
    let (self_dx, self_dy) = props
        .self_anchor
        .offset(child_node.width, child_node.height);
    let delta_x = anchor_x - (child_node.x + self_dx);
    let delta_y = anchor_y - (child_node.y + self_dy);

    if let Some(child_node) = scene.get_mut(child) {
        child_node.x += delta_x;
        child_node.y += delta_y;
    }
}
