//! Projection of a computed style into the layout-relevant subset.

use scene::NodeId;
use style_engine::{StyleMap, StyleValue};

/// Flow algorithm selected by the `display` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Vertical,
    Horizontal,
    Grid,
}

/// How a node participates in its parent's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
    Anchor,
}

impl Position {
    /// In-flow nodes participate in the parent's flow layout; absolute and
    /// anchor nodes are positioned independently afterwards.
    pub fn is_in_flow(self) -> bool {
        matches!(self, Position::Relative)
    }
}

/// Cross-axis and per-cell alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "start" => Some(Align::Start),
            "center" => Some(Align::Center),
            "end" => Some(Align::End),
            _ => None,
        }
    }
}

/// Main-axis distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
    SpaceAround,
}

impl Justify {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "start" => Some(Justify::Start),
            "center" => Some(Justify::Center),
            "end" => Some(Justify::End),
            "space-between" => Some(Justify::SpaceBetween),
            "space-around" => Some(Justify::SpaceAround),
            _ => None,
        }
    }
}

/// One of the nine named points on a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnchorPoint {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    #[default]
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl AnchorPoint {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "top-left" => Some(AnchorPoint::TopLeft),
            "top" | "top-center" => Some(AnchorPoint::TopCenter),
            "top-right" => Some(AnchorPoint::TopRight),
            "left" | "center-left" => Some(AnchorPoint::CenterLeft),
            "center" => Some(AnchorPoint::Center),
            "right" | "center-right" => Some(AnchorPoint::CenterRight),
            "bottom-left" => Some(AnchorPoint::BottomLeft),
            "bottom" | "bottom-center" => Some(AnchorPoint::BottomCenter),
            "bottom-right" => Some(AnchorPoint::BottomRight),
            _ => None,
        }
    }

    /// Offset of this point from the rectangle's top-left corner.
    pub fn offset(self, width: f32, height: f32) -> (f32, f32) {
        match self {
            AnchorPoint::TopLeft => (0.0, 0.0),
            AnchorPoint::TopCenter => (width / 2.0, 0.0),
            AnchorPoint::TopRight => (width, 0.0),
            AnchorPoint::CenterLeft => (0.0, height / 2.0),
            AnchorPoint::Center => (width / 2.0, height / 2.0),
            AnchorPoint::CenterRight => (width, height / 2.0),
            AnchorPoint::BottomLeft => (0.0, height),
            AnchorPoint::BottomCenter => (width / 2.0, height),
            AnchorPoint::BottomRight => (width, height),
        }
    }
}

/// Target of an anchor-positioned node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorTarget {
    Parent,
    Tag(String),
    /// A raw node handle, written as a numeric `anchorTarget` value.
    Node(NodeId),
}

/// Layout-relevant view over a computed style, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutProps {
    pub display: Display,
    /// Whether `display` was declared at all. Flow layout only runs for
    /// containers that declare it; the defaulted `display` still selects the
    /// fit-content formula.
    pub display_declared: bool,
    pub position: Position,
    pub gap: f32,
    pub align_items: Align,
    pub justify_content: Justify,
    pub columns: usize,
    pub fit_content: bool,
    pub top: Option<f32>,
    pub right: Option<f32>,
    pub bottom: Option<f32>,
    pub left: Option<f32>,
    pub anchor_target: Option<AnchorTarget>,
    pub anchor_point: AnchorPoint,
    pub self_anchor: AnchorPoint,
    pub anchor_offset_x: f32,
    pub anchor_offset_y: f32,
}

impl LayoutProps {
    pub fn from_style(style: &StyleMap) -> Self {
        let display = match style.keyword("display") {
            Some("horizontal") => Display::Horizontal,
            Some("grid") => Display::Grid,
            _ => Display::Vertical,
        };
        let position = match style.keyword("position") {
            Some("absolute") => Position::Absolute,
            Some("anchor") => Position::Anchor,
            _ => Position::Relative,
        };
        let align_items = style
            .keyword("alignItems")
            .or_else(|| style.keyword("alignment"))
            .and_then(Align::parse)
            .unwrap_or_default();
        let justify_content = style
            .keyword("justifyContent")
            .and_then(Justify::parse)
            .unwrap_or_default();
        // A misconfigured column count degrades to one column.
        let columns = style
            .number("columns")
            .map(|n| (n as usize).max(1))
            .unwrap_or(2);
        let fit_content = match style.get("fitContent") {
            Some(value) => match value.as_number() {
                Some(number) => number != 0.0,
                None => value.as_keyword() == Some("true"),
            },
            None => false,
        };
        let anchor_target = style.get("anchorTarget").map(|value| match value {
            StyleValue::Number(id) => AnchorTarget::Node(NodeId(*id as u64)),
            StyleValue::Keyword(keyword) if keyword == "parent" => AnchorTarget::Parent,
            StyleValue::Keyword(tag) => AnchorTarget::Tag(tag.clone()),
        });
        Self {
            display,
            display_declared: style.contains("display"),
            position,
            gap: style.number("gap").unwrap_or(0.0),
            align_items,
            justify_content,
            columns,
            fit_content,
            top: style.number("top"),
            right: style.number("right"),
            bottom: style.number("bottom"),
            left: style.number("left"),
            anchor_target,
            anchor_point: style
                .keyword("anchorPoint")
                .and_then(AnchorPoint::parse)
                .unwrap_or_default(),
            self_anchor: style
                .keyword("selfAnchor")
                .and_then(AnchorPoint::parse)
                .unwrap_or_default(),
            anchor_offset_x: style.number("anchorOffsetX").unwrap_or(0.0),
            anchor_offset_y: style.number("anchorOffsetY").unwrap_or(0.0),
        }
    }

    /// Per-child cross alignment override read at layout time.
    pub fn align_self(style: &StyleMap) -> Option<Align> {
        style.keyword("alignSelf").and_then(Align::parse)
    }

    /// Per-child grid column alignment override.
    pub fn justify_self(style: &StyleMap) -> Option<Align> {
        style.keyword("justifySelf").and_then(Align::parse)
    }
}

/// Clamp a size to optional min/max bounds; min wins when they conflict.
pub fn clamp_size(value: f32, min: Option<f32>, max: Option<f32>) -> f32 {
    let mut clamped = value;
    if let Some(max) = max {
        clamped = clamped.min(max);
    }
    if let Some(min) = min {
        clamped = clamped.max(min);
    }
    clamped
}
