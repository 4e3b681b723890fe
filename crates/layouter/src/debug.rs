//! Single-step debug driver.
//!
//! Replays the tree driver's phases one step at a time from an explicit
//! frame stack, so a controller can inspect the tree between sub-phases.
//! Child recursion splices the child's steps into the parent's sequence.
//! The driver owns its computed-style scratch for the whole stepped pass.

use crate::driver::{
    ComputedStyles, NodePlan, apply_style_phase, partition, position_out_of_flow, run_fit,
    run_flow,
};
use crate::props::{Display, LayoutProps, Position};
use scene::{NodeId, Scene};
use serde::Serialize;
use std::collections::BTreeMap;
use style_engine::{StyleMap, StyleRegistry};

/// Snapshot of one node at the moment a step fired.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSnapshot {
    pub id: u64,
    pub tags: Vec<String>,
    pub classes: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Effective style, rendered as sorted `property → value` text.
    pub style: BTreeMap<String, String>,
}

/// One debug step: a label, the subject node, and per-child snapshots where
/// the phase touched children.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub label: String,
    pub node: NodeSnapshot,
    pub children: Vec<NodeSnapshot>,
}

/// Result of advancing the driver.
#[derive(Debug, Clone, Serialize)]
pub enum DebugStep {
    Step(StepRecord),
    /// The sequence is exhausted; the driver has disabled itself.
    Finished,
}

#[derive(Debug, Clone, Copy)]
enum Stage {
    Style,
    Partition,
    Recurse(usize),
    Flow,
    Fit,
    OutChild(usize),
    Position(usize),
    Done,
}

struct Frame {
    node: NodeId,
    pending_props: Option<LayoutProps>,
    plan: Option<NodePlan>,
    stage: Stage,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            pending_props: None,
            plan: None,
            stage: Stage::Style,
        }
    }
}

/// Step generator over one layout pass rooted at a node.
pub struct DebugDriver {
    stack: Vec<Frame>,
    computed: ComputedStyles,
    finished: bool,
}

impl DebugDriver {
    pub fn new(root: NodeId) -> Self {
        Self {
            stack: vec![Frame::new(root)],
            computed: ComputedStyles::new(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one step. Mutates the scene exactly as far as the returned
    /// step describes; returns [`DebugStep::Finished`] once exhausted.
    pub fn next_step(&mut self, scene: &mut Scene, registry: &StyleRegistry) -> DebugStep {
        if self.finished {
            return DebugStep::Finished;
        }
        loop {
            let Some(top) = self.stack.len().checked_sub(1) else {
                self.finished = true;
                return DebugStep::Finished;
            };
            let node = self.stack[top].node;
            let stage = self.stack[top].stage;
            match stage {
                Stage::Style => {
                    let props = apply_style_phase(scene, registry, &mut self.computed, node);
                    self.stack[top].pending_props = Some(props);
                    self.stack[top].stage = Stage::Partition;
                    return DebugStep::Step(StepRecord {
                        label: "compute style".into(),
                        node: self.snapshot(scene, node),
                        children: Vec::new(),
                    });
                }
                Stage::Partition => {
                    let props = self.stack[top]
                        .pending_props
                        .take()
                        .unwrap_or_else(|| LayoutProps::from_style(&StyleMap::new()));
                    let plan = partition(scene, registry, &mut self.computed, node, props);
                    let children: Vec<NodeSnapshot> = plan
                        .in_flow
                        .iter()
                        .chain(plan.out_of_flow.iter())
                        .map(|&child| self.snapshot(scene, child))
                        .collect();
                    self.stack[top].plan = Some(plan);
                    self.stack[top].stage = Stage::Recurse(0);
                    return DebugStep::Step(StepRecord {
                        label: "partition children".into(),
                        node: self.snapshot(scene, node),
                        children,
                    });
                }
                Stage::Recurse(index) => {
                    let child = self.stack[top]
                        .plan
                        .as_ref()
                        .and_then(|plan| plan.in_flow.get(index).copied());
                    match child {
                        Some(child) => {
                            self.stack[top].stage = Stage::Recurse(index + 1);
                            self.stack.push(Frame::new(child));
                        }
                        None => self.stack[top].stage = Stage::Flow,
                    }
                }
                Stage::Flow => {
                    let (ran, display) = match self.stack[top].plan.as_ref() {
                        Some(plan) => {
                            (run_flow(scene, &self.computed, plan), plan.props.display)
                        }
                        None => (false, Display::Vertical),
                    };
                    self.stack[top].stage = Stage::Fit;
                    if ran {
                        let children = self.in_flow_snapshots(scene, top);
                        return DebugStep::Step(StepRecord {
                            label: format!("flow layout ({})", display_name(display)),
                            node: self.snapshot(scene, node),
                            children,
                        });
                    }
                }
                Stage::Fit => {
                    let ran = match self.stack[top].plan.as_ref() {
                        Some(plan) => run_fit(scene, &self.computed, plan),
                        None => false,
                    };
                    self.stack[top].stage = Stage::OutChild(0);
                    if ran {
                        let children = self.in_flow_snapshots(scene, top);
                        return DebugStep::Step(StepRecord {
                            label: "fit content".into(),
                            node: self.snapshot(scene, node),
                            children,
                        });
                    }
                }
                Stage::OutChild(index) => {
                    let child = self.stack[top]
                        .plan
                        .as_ref()
                        .and_then(|plan| plan.out_of_flow.get(index).copied());
                    match child {
                        Some(child) => {
                            self.stack[top].stage = Stage::Position(index);
                            self.stack.push(Frame::new(child));
                        }
                        None => self.stack[top].stage = Stage::Done,
                    }
                }
                Stage::Position(index) => {
                    let child = self.stack[top]
                        .plan
                        .as_ref()
                        .and_then(|plan| plan.out_of_flow.get(index).copied());
                    self.stack[top].stage = Stage::OutChild(index + 1);
                    if let Some(child) = child {
                        let position = position_out_of_flow(scene, &self.computed, child);
                        let label = match position {
                            Position::Absolute => "position (absolute)",
                            Position::Anchor => "position (anchor)",
                            Position::Relative => "position",
                        };
                        return DebugStep::Step(StepRecord {
                            label: label.into(),
                            node: self.snapshot(scene, child),
                            children: Vec::new(),
                        });
                    }
                }
                Stage::Done => {
                    self.stack.pop();
                }
            }
        }
    }

    fn in_flow_snapshots(&self, scene: &Scene, top: usize) -> Vec<NodeSnapshot> {
        self.stack[top]
            .plan
            .as_ref()
            .map(|plan| {
                plan.in_flow
                    .iter()
                    .map(|&child| self.snapshot(scene, child))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn snapshot(&self, scene: &Scene, id: NodeId) -> NodeSnapshot {
        let style: BTreeMap<String, String> = self
            .computed
            .get(&id)
            .map(|style| style.entries().into_iter().collect())
            .unwrap_or_default();
        match scene.get(id) {
            Some(node) => NodeSnapshot {
                id: id.0,
                tags: node.all_tags(),
                classes: node.classes().to_owned(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                style,
            },
            None => NodeSnapshot {
                id: id.0,
                tags: Vec::new(),
                classes: String::new(),
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
                style,
            },
        }
    }
}

fn display_name(display: Display) -> &'static str {
    match display {
        Display::Vertical => "vertical",
        Display::Horizontal => "horizontal",
        Display::Grid => "grid",
    }
}
