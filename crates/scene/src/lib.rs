//! Retained scene graph consumed by the layout engine.
//!
//! The scene owns a flat arena of rectangular instances. The layout engine
//! never creates or destroys nodes; it reads geometry, visibility, tags and
//! the `classes`/`style`/`doLayout` attributes, and writes `x`, `y`,
//! `width`, `height` back.

use anyhow::{Error, bail};
use log::warn;
use std::collections::{HashMap, HashSet};

/// Attribute holding the whitespace-separated style class list.
pub const ATTR_CLASSES: &str = "classes";
/// Attribute holding the inline style block.
pub const ATTR_STYLE: &str = "style";
/// Attribute that excludes a node from layout when set to exactly `"false"`.
pub const ATTR_DO_LAYOUT: &str = "doLayout";

/// Opaque handle to a scene node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

/// A rectangular instance in the scene.
#[derive(Debug, Clone)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    visible: bool,
    tags: HashSet<String>,
    attrs: HashMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            visible: true,
            tags: HashSet::new(),
            attrs: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in layout order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_owned(), value.to_owned());
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        self.attrs.remove(name)
    }

    /// Whitespace-separated class list; empty when unset.
    pub fn classes(&self) -> &str {
        self.attribute(ATTR_CLASSES).unwrap_or("")
    }

    pub fn set_classes(&mut self, classes: &str) {
        self.set_attribute(ATTR_CLASSES, classes);
    }

    /// Inline style block; empty when unset.
    pub fn style_text(&self) -> &str {
        self.attribute(ATTR_STYLE).unwrap_or("")
    }

    pub fn set_style_text(&mut self, text: &str) {
        self.set_attribute(ATTR_STYLE, text);
    }

    /// A node opts out of layout only with the exact value `"false"`.
    pub fn layout_enabled(&self) -> bool {
        self.attribute(ATTR_DO_LAYOUT) != Some("false")
    }

    pub fn add_tag(&mut self, tag: &str) {
        self.tags.insert(tag.to_owned());
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag);
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// All tags, sorted for deterministic output.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.tags.iter().cloned().collect();
        tags.sort();
        tags
    }
}

/// Flat arena of nodes keyed by [`NodeId`].
#[derive(Debug)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 1,
        }
    }

    /// Create a detached node and return its handle.
    pub fn create_node(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new());
        id
    }

    /// Create a node already attached to `parent`.
    pub fn create_child(&mut self, parent: NodeId) -> Result<NodeId, Error> {
        let id = self.create_node();
        self.attach(parent, id)?;
        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(Node::parent)
    }

    /// Children of `id` in layout order; empty for unknown nodes.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|node| node.children.to_vec())
            .unwrap_or_default()
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// # Errors
    /// Fails when either node is missing, when `child == parent`, or when the
    /// attachment would create a cycle.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> Result<(), Error> {
        if !self.nodes.contains_key(&parent) {
            bail!("attach: parent {parent:?} does not exist");
        }
        if !self.nodes.contains_key(&child) {
            bail!("attach: child {child:?} does not exist");
        }
        if parent == child {
            bail!("attach: cannot attach {child:?} to itself");
        }
        // Walking up from the parent must never reach the child.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                bail!("attach: {child:?} is an ancestor of {parent:?}");
            }
            cursor = self.parent_of(node);
        }
        self.detach(child)?;
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
        Ok(())
    }

    /// Detach `child` from its parent, if any.
    ///
    /// # Errors
    /// Fails when the node does not exist.
    pub fn detach(&mut self, child: NodeId) -> Result<(), Error> {
        let Some(node) = self.nodes.get_mut(&child) else {
            bail!("detach: node {child:?} does not exist");
        };
        let Some(parent) = node.parent.take() else {
            return Ok(());
        };
        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.retain(|c| *c != child);
        } else {
            warn!("detach: parent {parent:?} of {child:?} missing from scene");
        }
        Ok(())
    }

    /// Remove a node and its entire subtree.
    pub fn remove_node(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|c| *c != id);
                }
            }
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children {
                self.remove_subtree(child);
            }
        }
    }

    /// First node carrying `tag`, scanning the whole scene.
    ///
    /// Handles are compared so the lowest id wins, which makes the "first
    /// match" of the host object directory deterministic.
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, node)| node.has_tag(tag))
            .map(|(id, _)| *id)
            .min()
    }

    /// Nodes without a parent, in ascending id order. The tick scheduler
    /// runs a layout pass over each of these.
    pub fn roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(id, _)| *id)
            .collect();
        roots.sort();
        roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Write a node's rectangle in one call.
    pub fn set_rect(&mut self, id: NodeId, x: f32, y: f32, width: f32, height: f32) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.x = x;
            node.y = y;
            node.width = width;
            node.height = height;
        }
    }
}
