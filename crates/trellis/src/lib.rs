//! Facade over the style registry, the layout pass, and the step debugger.
//!
//! The host registers style classes once, then calls
//! [`LayoutEngine::process_instance`] per root per tick. Arming debug mode
//! suspends tick layout; the tree then changes only through
//! [`LayoutEngine::next_step`].

use layouter::DebugDriver;
use log::{debug, warn};
use style_engine::StyleRegistry;

pub use layouter::{
    Align, AnchorPoint, AnchorTarget, DebugStep, Display, Justify, LayoutProps, NodeSnapshot,
    Position, StepRecord, format_tree,
};
pub use scene::{Node, NodeId, Scene};
pub use style_engine::{StyleMap, StyleValue, parse_style_block};

/// The engine: style class registry plus the layout and debug entry points.
#[derive(Default)]
pub struct LayoutEngine {
    registry: StyleRegistry,
    driver: Option<DebugDriver>,
    highlight: Option<NodeId>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` once and store it under `name`; re-registration
    /// overwrites.
    pub fn register_class(&mut self, name: &str, text: &str) {
        self.registry.register(name, text);
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// Run one layout pass rooted at `root`. Returns the number of nodes
    /// visited; a no-op returning 0 while debug mode is armed.
    pub fn process_instance(&self, scene: &mut Scene, root: NodeId) -> usize {
        if self.driver.is_some() {
            debug!("debug mode armed; tick layout suppressed for {root:?}");
            return 0;
        }
        layouter::process_instance(scene, &self.registry, root)
    }

    /// Lay out every root in the scene, as the per-tick scheduler would.
    pub fn process_all(&self, scene: &mut Scene) -> usize {
        let mut visited = 0;
        for root in scene.roots() {
            visited += self.process_instance(scene, root);
        }
        visited
    }

    /// Arm the step generator from `root`. Tick layout is suppressed until
    /// the sequence finishes or [`LayoutEngine::disable_debug_mode`] runs.
    pub fn enable_debug_mode(&mut self, root: NodeId) {
        self.driver = Some(DebugDriver::new(root));
    }

    pub fn disable_debug_mode(&mut self) {
        self.driver = None;
    }

    pub fn debug_armed(&self) -> bool {
        self.driver.is_some()
    }

    /// Host-provided highlighter rectangle moved over each step's subject.
    pub fn set_debug_highlight(&mut self, node: Option<NodeId>) {
        self.highlight = node;
    }

    /// Advance the debugger one step. When the sequence is exhausted the
    /// driver disarms itself; advancing while inactive logs a warning and
    /// returns the terminal indicator.
    pub fn next_step(&mut self, scene: &mut Scene) -> DebugStep {
        let Some(driver) = self.driver.as_mut() else {
            warn!("next_step called while debug mode is inactive");
            return DebugStep::Finished;
        };
        let step = driver.next_step(scene, &self.registry);
        match &step {
            DebugStep::Step(record) => {
                if let Some(highlight) = self.highlight {
                    scene.set_rect(
                        highlight,
                        record.node.x,
                        record.node.y,
                        record.node.width,
                        record.node.height,
                    );
                }
            }
            DebugStep::Finished => {
                self.driver = None;
            }
        }
        step
    }

    /// One step rendered as JSON for console wiring; `None` once finished.
    pub fn next_step_json(&mut self, scene: &mut Scene) -> Option<String> {
        match self.next_step(scene) {
            DebugStep::Step(record) => serde_json::to_string(&record).ok(),
            DebugStep::Finished => None,
        }
    }
}
