//! Vertical and horizontal flow layout with flex grow/shrink.
//!
//! The algorithm is expressed over axis-neutral container/item inputs and
//! produces placements; the driver maps scene state in and writes geometry
//! back. For vertical flow the main axis is y, for horizontal it is x;
//! everything else is identical.

use crate::props::{Align, Justify, clamp_size};
use log::trace;
use scene::NodeId;
use style_engine::StyleMap;

/// Free space below this threshold stops the grow loop.
const GROW_SPACE_EPSILON: f32 = 0.1;
/// A grow pass applying less than this total is treated as no progress.
const GROW_PROGRESS_EPSILON: f32 = 0.01;

/// Axis selector for flow layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowAxis {
    Vertical,
    Horizontal,
}

/// Container inputs on the flow's main/cross axes.
#[derive(Debug, Clone, Copy)]
pub struct FlowContainer {
    /// Container border-box origin on the main axis.
    pub main_origin: f32,
    /// Container border-box origin on the cross axis.
    pub cross_origin: f32,
    pub main_size: f32,
    pub cross_size: f32,
    /// Padding + border at the main-axis start.
    pub inset_main_start: f32,
    pub inset_main_end: f32,
    pub inset_cross_start: f32,
    pub inset_cross_end: f32,
    pub gap: f32,
    pub align_items: Align,
    pub justify_content: Justify,
}

impl FlowContainer {
    pub fn content_main(&self) -> f32 {
        self.main_size - self.inset_main_start - self.inset_main_end
    }

    pub fn content_cross(&self) -> f32 {
        self.cross_size - self.inset_cross_start - self.inset_cross_end
    }
}

/// One in-flow child as seen by the flow algorithm.
#[derive(Debug, Clone, Copy)]
pub struct FlowItem {
    pub id: NodeId,
    /// Current main-axis size (the fixed contribution, and the flex fallback
    /// base when no numeric basis is declared).
    pub main_size: f32,
    pub cross_size: f32,
    pub margin_main_start: f32,
    pub margin_main_end: f32,
    pub margin_cross_start: f32,
    pub margin_cross_end: f32,
    pub grow: f32,
    pub shrink: f32,
    /// Flex base size; equals `main_size` unless a numeric basis applies.
    pub base_size: f32,
    pub is_flex: bool,
    pub min_main: Option<f32>,
    pub max_main: Option<f32>,
    pub align_self: Option<Align>,
}

impl FlowItem {
    /// A fixed-size item occupying its current main size.
    pub fn fixed(id: NodeId, main_size: f32, cross_size: f32) -> Self {
        Self {
            id,
            main_size,
            cross_size,
            margin_main_start: 0.0,
            margin_main_end: 0.0,
            margin_cross_start: 0.0,
            margin_cross_end: 0.0,
            grow: 0.0,
            shrink: 0.0,
            base_size: main_size,
            is_flex: false,
            min_main: None,
            max_main: None,
            align_self: None,
        }
    }

    fn margin_main(&self) -> f32 {
        self.margin_main_start + self.margin_main_end
    }
}

/// Final position and main-axis size of one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowPlacement {
    pub id: NodeId,
    pub main_pos: f32,
    pub cross_pos: f32,
    pub main_size: f32,
}

/// Effective flex factors of a child style.
///
/// A child is a flex item only when it declares flex behavior: grow defaults
/// to 0, and shrink defaults to 1 only once another flex property is present
/// (the `flex` shorthand always writes all three). Bare children stay fixed.
pub(crate) fn flex_factors(style: &StyleMap) -> (f32, f32, bool) {
    let grow = style.number("flexGrow").unwrap_or(0.0);
    let declares_flex = style.contains("flexGrow") || style.contains("flexBasis");
    let default_shrink = if declares_flex { 1.0 } else { 0.0 };
    let shrink = style.number("flexShrink").unwrap_or(default_shrink);
    let is_flex = grow > 0.0 || shrink > 0.0;
    (grow, shrink, is_flex)
}

/// Lay out one line of in-flow children inside the container.
pub fn layout_flow(container: &FlowContainer, items: &[FlowItem]) -> Vec<FlowPlacement> {
    if items.is_empty() {
        return Vec::new();
    }
    let count = items.len();
    let content_main = container.content_main();
    let total_gaps = container.gap * count.saturating_sub(1) as f32;

    let total_fixed: f32 = items
        .iter()
        .filter(|item| !item.is_flex)
        .map(|item| item.main_size + item.margin_main())
        .sum();
    let flex_sum: f32 = items
        .iter()
        .filter(|item| item.is_flex)
        .map(|item| item.base_size + item.margin_main())
        .sum();
    let available = content_main - total_fixed - total_gaps - flex_sum;
    trace!(
        "flow: content_main={content_main:.2} fixed={total_fixed:.2} gaps={total_gaps:.2} \
         flex={flex_sum:.2} available={available:.2}"
    );

    let mut sizes: Vec<f32> = items
        .iter()
        .map(|item| if item.is_flex { item.base_size } else { item.main_size })
        .collect();

    if available > 0.0 && items.iter().any(|item| item.is_flex && item.grow > 0.0) {
        distribute_grow(available, items, &mut sizes);
    } else if available < 0.0 && items.iter().any(|item| item.is_flex && item.shrink > 0.0) {
        distribute_shrink(available, items, &mut sizes);
    }

    let actual_total: f32 = items
        .iter()
        .zip(sizes.iter())
        .map(|(item, size)| size + item.margin_main())
        .sum::<f32>()
        + total_gaps;
    let remaining = (content_main - actual_total).max(0.0);
    let (start_offset, between, around) =
        justify_params(container.justify_content, remaining, count);

    let mut cursor = container.inset_main_start + start_offset + around / 2.0;
    let mut placements = Vec::with_capacity(count);
    for (index, (item, size)) in items.iter().zip(sizes.iter()).enumerate() {
        cursor += item.margin_main_start;
        placements.push(FlowPlacement {
            id: item.id,
            main_pos: container.main_origin + cursor,
            cross_pos: cross_position(container, item),
            main_size: *size,
        });
        cursor += size + item.margin_main_end;
        if index + 1 < count {
            cursor += container.gap + between + around;
        }
    }
    placements
}

/// Distribute positive free space among growing items.
///
/// Iterative: each pass hands every active item its grow share of the space
/// remaining at pass start, clamps it, and retires items that hit a bound.
/// The loop stops when the space epsilon is reached, no grow factors remain,
/// or a pass makes no measurable progress.
fn distribute_grow(available: f32, items: &[FlowItem], sizes: &mut [f32]) {
    debug_assert!(available >= 0.0, "grow called with negative free space");
    let mut active: Vec<bool> = items
        .iter()
        .map(|item| item.is_flex && item.grow > 0.0)
        .collect();
    let mut remaining_space = available;
    loop {
        let remaining_grow: f32 = items
            .iter()
            .zip(active.iter())
            .filter(|(_, is_active)| **is_active)
            .map(|(item, _)| item.grow)
            .sum();
        if remaining_space <= GROW_SPACE_EPSILON || remaining_grow <= 0.0 {
            break;
        }
        let space_at_start = remaining_space;
        let mut applied_total = 0.0f32;
        for ((item, size), is_active) in items.iter().zip(sizes.iter_mut()).zip(active.iter_mut())
        {
            if !*is_active {
                continue;
            }
            let delta = item.grow / remaining_grow * space_at_start;
            let target = *size + delta;
            let clamped = clamp_size(target, item.min_main, item.max_main);
            if (clamped - target).abs() > f32::EPSILON {
                *is_active = false;
            }
            applied_total += clamped - *size;
            *size = clamped;
        }
        remaining_space -= applied_total;
        if applied_total < GROW_PROGRESS_EPSILON {
            break;
        }
    }
}

/// Shrink items in a single weighted pass; weight is `shrink × base size`.
fn distribute_shrink(available: f32, items: &[FlowItem], sizes: &mut [f32]) {
    debug_assert!(available <= 0.0, "shrink called with positive free space");
    let deficit = -available;
    let total_weight: f32 = items
        .iter()
        .filter(|item| item.is_flex && item.shrink > 0.0)
        .map(|item| item.shrink * item.base_size)
        .sum();
    if total_weight <= 0.0 {
        return;
    }
    for (item, size) in items.iter().zip(sizes.iter_mut()) {
        if !item.is_flex || item.shrink <= 0.0 {
            continue;
        }
        let reduction = deficit * (item.shrink * item.base_size) / total_weight;
        let target = (item.base_size - reduction).max(0.0);
        *size = match item.min_main {
            Some(min) => target.max(min),
            None => target,
        };
    }
}

/// Start offset, between-item spacing, and around-item spacing for a justify
/// mode. `space-around` also advances half a slot before the first item.
fn justify_params(justify: Justify, remaining: f32, count: usize) -> (f32, f32, f32) {
    match justify {
        Justify::Start => (0.0, 0.0, 0.0),
        Justify::Center => (remaining / 2.0, 0.0, 0.0),
        Justify::End => (remaining, 0.0, 0.0),
        Justify::SpaceBetween if count > 1 => (0.0, remaining / (count as f32 - 1.0), 0.0),
        Justify::SpaceBetween => (0.0, 0.0, 0.0),
        Justify::SpaceAround if count > 0 => (0.0, 0.0, remaining / count as f32),
        Justify::SpaceAround => (0.0, 0.0, 0.0),
    }
}

/// Cross-axis position from `alignSelf`, falling back to `alignItems`.
fn cross_position(container: &FlowContainer, item: &FlowItem) -> f32 {
    let align = item.align_self.unwrap_or(container.align_items);
    match align {
        Align::Start => {
            container.cross_origin + container.inset_cross_start + item.margin_cross_start
        }
        Align::Center => {
            container.cross_origin
                + container.inset_cross_start
                + (container.content_cross() - item.cross_size) / 2.0
        }
        Align::End => {
            container.cross_origin + container.cross_size
                - container.inset_cross_end
                - item.cross_size
                - item.margin_cross_end
        }
    }
}
