//! Grid layout with a fixed column count and uniform cells.
//!
//! Cells are sized by the largest outer child box; `justify-content`
//! redistributes leftover width across columns, and each child aligns inside
//! its cell via `justifySelf` / `alignSelf`.

use crate::props::{Align, Justify};
use scene::NodeId;

/// Container inputs for grid layout.
#[derive(Debug, Clone, Copy)]
pub struct GridContainer {
    /// Border-box origin.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Border-box width.
    pub width: f32,
    /// Padding + border on each relevant side.
    pub inset_left: f32,
    pub inset_right: f32,
    pub inset_top: f32,
    pub columns: usize,
    pub gap: f32,
    pub justify_content: Justify,
    pub align_items: Align,
}

/// One grid child.
#[derive(Debug, Clone, Copy)]
pub struct GridItem {
    pub id: NodeId,
    pub width: f32,
    pub height: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub justify_self: Option<Align>,
    pub align_self: Option<Align>,
}

impl GridItem {
    fn outer_width(&self) -> f32 {
        self.width + self.margin_left + self.margin_right
    }

    fn outer_height(&self) -> f32 {
        self.height + self.margin_top + self.margin_bottom
    }
}

/// Final position of one grid child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridPlacement {
    pub id: NodeId,
    pub x: f32,
    pub y: f32,
}

/// Uniform cell extents and the row count for `count` items.
pub(crate) fn cell_metrics(items: &[GridItem], columns: usize) -> (f32, f32, usize) {
    let max_cell_width = items.iter().map(GridItem::outer_width).fold(0.0, f32::max);
    let max_cell_height = items.iter().map(GridItem::outer_height).fold(0.0, f32::max);
    let rows = items.len().div_ceil(columns.max(1));
    (max_cell_width, max_cell_height, rows)
}

/// Place grid children into uniform cells.
pub fn layout_grid(container: &GridContainer, items: &[GridItem]) -> Vec<GridPlacement> {
    if items.is_empty() {
        return Vec::new();
    }
    let columns = container.columns.max(1);
    let (cell_width, cell_height, _rows) = cell_metrics(items, columns);

    let content_width = container.width - container.inset_left - container.inset_right;
    let used = columns as f32 * cell_width + (columns as f32 - 1.0) * container.gap;
    let extra_width = (content_width - used).max(0.0);
    let (start_x, extra_column_gap) = match container.justify_content {
        Justify::Start => (0.0, 0.0),
        Justify::Center => (extra_width / 2.0, 0.0),
        Justify::End => (extra_width, 0.0),
        Justify::SpaceBetween if columns > 1 => (0.0, extra_width / (columns as f32 - 1.0)),
        Justify::SpaceBetween => (0.0, 0.0),
        Justify::SpaceAround => {
            let slot = extra_width / columns as f32;
            (slot / 2.0, slot)
        }
    };

    let content_x = container.origin_x + container.inset_left;
    let content_y = container.origin_y + container.inset_top;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let row = index / columns;
            let col = index % columns;
            let cell_x = content_x
                + start_x
                + col as f32 * (cell_width + container.gap + extra_column_gap);
            let cell_y = content_y + row as f32 * (cell_height + container.gap);

            let justify = item.justify_self.unwrap_or(Align::Start);
            let x = match justify {
                Align::Start => cell_x + item.margin_left,
                Align::Center => cell_x + (cell_width - item.outer_width()) / 2.0 + item.margin_left,
                Align::End => cell_x + cell_width - item.outer_width() + item.margin_left,
            };
            let align = item.align_self.unwrap_or(container.align_items);
            let y = match align {
                Align::Start => cell_y + item.margin_top,
                Align::Center => cell_y + (cell_height - item.outer_height()) / 2.0 + item.margin_top,
                Align::End => cell_y + cell_height - item.outer_height() + item.margin_top,
            };
            GridPlacement { id: item.id, x, y }
        })
        .collect()
}
