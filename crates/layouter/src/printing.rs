//! Indented geometry dump of a laid-out subtree, for logs and tests.

use scene::{NodeId, Scene};
use std::fmt::Write;

/// Render the subtree under `root` one node per line:
///
/// ```text
/// #1 (100, 100) 254x334 classes="card" tags=[mainPanel]
///   #2 (127, 127) 200x80
/// ```
pub fn format_tree(scene: &Scene, root: NodeId) -> String {
    let mut out = String::new();
    format_node(scene, root, 0, &mut out);
    out
}

fn format_node(scene: &Scene, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = scene.get(id) else {
        return;
    };
    for _ in 0..depth {
        out.push_str("  ");
    }
    let _ = write!(
        out,
        "#{} ({}, {}) {}x{}",
        id.0, node.x, node.y, node.width, node.height
    );
    if !node.classes().is_empty() {
        let _ = write!(out, " classes=\"{}\"", node.classes());
    }
    let tags = node.all_tags();
    if !tags.is_empty() {
        let _ = write!(out, " tags=[{}]", tags.join(" "));
    }
    if !node.is_visible() {
        out.push_str(" hidden");
    }
    out.push('\n');
    for child in node.children() {
        format_node(scene, *child, depth + 1, out);
    }
}
