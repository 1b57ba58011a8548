//! Physical axes and the properties/metrics that belong to each.

use drag_host::{BoxMetrics, ViewportMetrics};
use drag_values_units::Property;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The offset that anchors the axis (`left` / `top`).
    pub const fn start(self) -> Property {
        match self {
            Self::Horizontal => Property::Left,
            Self::Vertical => Property::Top,
        }
    }

    /// The closing offset (`right` / `bottom`).
    pub const fn end(self) -> Property {
        match self {
            Self::Horizontal => Property::Right,
            Self::Vertical => Property::Bottom,
        }
    }

    pub const fn size(self) -> Property {
        match self {
            Self::Horizontal => Property::Width,
            Self::Vertical => Property::Height,
        }
    }

    /// Border and padding properties on both sides, outermost first.
    pub const fn box_edges(self) -> [Property; 4] {
        match self {
            Self::Horizontal => [
                Property::BorderLeftWidth,
                Property::PaddingLeft,
                Property::PaddingRight,
                Property::BorderRightWidth,
            ],
            Self::Vertical => [
                Property::BorderTopWidth,
                Property::PaddingTop,
                Property::PaddingBottom,
                Property::BorderBottomWidth,
            ],
        }
    }

    pub const fn borders(self) -> [Property; 2] {
        match self {
            Self::Horizontal => [Property::BorderLeftWidth, Property::BorderRightWidth],
            Self::Vertical => [Property::BorderTopWidth, Property::BorderBottomWidth],
        }
    }

    pub const fn offset_start(self, metrics: &BoxMetrics) -> f64 {
        match self {
            Self::Horizontal => metrics.offset_left,
            Self::Vertical => metrics.offset_top,
        }
    }

    pub const fn offset_size(self, metrics: &BoxMetrics) -> f64 {
        match self {
            Self::Horizontal => metrics.offset_width,
            Self::Vertical => metrics.offset_height,
        }
    }

    pub fn viewport_extent(self, viewport: &ViewportMetrics) -> f64 {
        match self {
            Self::Horizontal => viewport.width(),
            Self::Vertical => viewport.height(),
        }
    }
}
