//! CSS Positioned Layout — reducing an element's offsets to a single anchor.
//! Spec: <https://www.w3.org/TR/css-position-3/>
//!
//! An element can express its position through any combination of `top`,
//! `right`, `bottom` and `left`, in any unit, under four positioning schemes.
//! [`normalize`] picks the `(left, top)` pair that currently describes where
//! the element is and computes the inline-style edits that make that pair the
//! only source of truth: afterwards `top`/`left` hold the anchor in pixels and
//! `bottom`/`right` are `auto`.

#![forbid(unsafe_code)]

pub mod axis;
pub mod part_10_3_7_absolute_offsets;
pub mod part_9_4_3_relative_positioning;

pub use axis::Axis;

use core::fmt;

use drag_host::{Coordinate, NodeKey, StyleMutation, VisualHost};
use drag_values_units::{AbsoluteValues, Property, StyleValue, resolve_absolute_many};
use log::debug;

/// Properties read once per normalization.
const READ_PROPERTIES: [Property; 7] = [
    Property::Position,
    Property::Top,
    Property::Right,
    Property::Bottom,
    Property::Left,
    Property::Width,
    Property::Height,
];

/// Value of the `position` property.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositionScheme {
    #[default]
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl PositionScheme {
    /// Parse a computed `position`. Anything unrecognized is the initial value.
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "relative" => Self::Relative,
            "absolute" => Self::Absolute,
            "fixed" => Self::Fixed,
            "sticky" | "-webkit-sticky" => Self::Sticky,
            _ => Self::Static,
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Relative => "relative",
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
            Self::Sticky => "sticky",
        }
    }
}

impl fmt::Display for PositionScheme {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.keyword())
    }
}

/// Outcome of [`normalize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub scheme: PositionScheme,
    /// `(left, top)` in pixels once `mutation` is applied.
    pub anchor: Coordinate,
    pub mutation: StyleMutation,
}

/// Compute the drag anchor of `node` and the inline edits that pin it.
///
/// Pure read: the caller applies `mutation`.
pub fn normalize<H>(host: &H, node: NodeKey) -> Normalized
where
    H: VisualHost + ?Sized,
{
    let values = resolve_absolute_many(host, node, &READ_PROPERTIES);
    let scheme = values
        .get(Property::Position)
        .and_then(StyleValue::keyword)
        .map_or(PositionScheme::Static, PositionScheme::from_keyword);

    let mut mutation = StyleMutation::new();
    let anchor = match scheme {
        PositionScheme::Static => {
            mutation.set("position", PositionScheme::Relative.keyword());
            mutation.set("top", "0");
            mutation.set("left", "0");
            Coordinate::ORIGIN
        }
        PositionScheme::Absolute | PositionScheme::Fixed => {
            let metrics = host.box_metrics(node);
            let pin = |axis, mutation: &mut StyleMutation| {
                part_10_3_7_absolute_offsets::pin_axis(
                    host, node, scheme, axis, &values, &metrics, mutation,
                )
            };
            let y = pin(Axis::Vertical, &mut mutation);
            let x = pin(Axis::Horizontal, &mut mutation);
            Coordinate::new(x, y)
        }
        PositionScheme::Relative | PositionScheme::Sticky => {
            let y = part_9_4_3_relative_positioning::pin_axis(Axis::Vertical, &values, &mut mutation);
            let x =
                part_9_4_3_relative_positioning::pin_axis(Axis::Horizontal, &values, &mut mutation);
            Coordinate::new(x, y)
        }
    };

    debug!(
        "{node}: {scheme} anchored at ({}, {}) with {} edit(s)",
        anchor.x,
        anchor.y,
        mutation.len()
    );
    Normalized {
        scheme,
        anchor,
        mutation,
    }
}

/// Specified offset in pixels; `auto` and non-length keywords are `None`.
pub(crate) fn offset_px(values: &AbsoluteValues, property: Property) -> Option<f64> {
    values.get(property).and_then(StyleValue::as_px)
}

/// Serialize a pixel length for an inline declaration.
pub(crate) fn px(value: f64) -> String {
    StyleValue::Px(value).to_string()
}
