//! Layout engine over a retained scene graph.
//!
//! A pass over a root node runs, per node: style resolution and explicit
//! sizing, child partitioning, bottom-up recursion, flow layout (vertical /
//! horizontal / grid), fit-content, percentage re-resolution, and finally
//! out-of-flow positioning (absolute and anchor). Geometry is mutated in
//! place; nothing is cached between passes.
//!
//! The debug driver in [`debug`] replays the same phases one step at a time
//! for single-step inspection.

mod absolute;
mod anchor;
mod box_model;
pub mod debug;
mod driver;
mod fit;
mod flow;
mod grid;
mod percent;
mod printing;
mod props;

pub use box_model::{BoxModel, Edges, box_model};
pub use debug::{DebugDriver, DebugStep, NodeSnapshot, StepRecord};
pub use driver::{ComputedStyles, process_instance};
pub use flow::{FlowAxis, FlowContainer, FlowItem, FlowPlacement, layout_flow};
pub use grid::{GridContainer, GridItem, GridPlacement, layout_grid};
pub use printing::format_tree;
pub use props::{
    Align, AnchorPoint, AnchorTarget, Display, Justify, LayoutProps, Position, clamp_size,
};
