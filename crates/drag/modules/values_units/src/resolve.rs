//! Resolution of computed positioning and box-metric values to absolute pixels.
//!
//! Hosts may report computed values in the unit they were authored in. The
//! resolver converts them, walking up the ancestry for percentages and
//! font-relative units.

use core::fmt;
use std::collections::HashMap;

use drag_host::{NodeKey, VisualHost};
use log::trace;

use crate::chapter_6_dimensions::{
    Length, LengthUnit, Viewport, compute_length_px, parse_length_str,
};

/// Font size of the initial containing block.
pub const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

/// Positioning and box-metric properties the resolver understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    Position,
    Top,
    Right,
    Bottom,
    Left,
    Width,
    Height,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    BorderTopWidth,
    BorderRightWidth,
    BorderBottomWidth,
    BorderLeftWidth,
    FontSize,
}

impl Property {
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Width => "width",
            Self::Height => "height",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::BorderTopWidth => "border-top-width",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftWidth => "border-left-width",
            Self::FontSize => "font-size",
        }
    }

    /// The property a percentage refers to on the containing element.
    ///
    /// Vertical offsets and heights resolve against height; horizontal offsets,
    /// widths and every padding resolve against width (CSS 2.2 §8.4).
    pub const fn percentage_basis(self) -> Option<Self> {
        match self {
            Self::Top | Self::Bottom | Self::Height => Some(Self::Height),
            Self::Left
            | Self::Right
            | Self::Width
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft => Some(Self::Width),
            Self::FontSize => Some(Self::FontSize),
            Self::Position
            | Self::BorderTopWidth
            | Self::BorderRightWidth
            | Self::BorderBottomWidth
            | Self::BorderLeftWidth => None,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.css_name())
    }
}

/// A computed value after resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Px(f64),
    Auto,
    /// Anything that is not a length, e.g. `static` for `position`.
    Keyword(String),
}

impl StyleValue {
    #[inline]
    pub fn as_px(&self) -> Option<f64> {
        match *self {
            Self::Px(value) => Some(value),
            Self::Auto | Self::Keyword(_) => None,
        }
    }

    /// Pixel value, or `fallback` for `auto` and keywords.
    #[inline]
    pub fn px_or(&self, fallback: f64) -> f64 {
        self.as_px().unwrap_or(fallback)
    }

    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::Keyword(text) => Some(text.as_str()),
            Self::Px(_) | Self::Auto => None,
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(formatter, "{value}px"),
            Self::Auto => formatter.write_str("auto"),
            Self::Keyword(text) => formatter.write_str(text),
        }
    }
}

/// Keyed result of [`resolve_absolute_many`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AbsoluteValues {
    values: HashMap<Property, StyleValue>,
}

impl AbsoluteValues {
    pub fn get(&self, property: Property) -> Option<&StyleValue> {
        self.values.get(&property)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolve one computed property of `node` to pixels.
///
/// `auto` stays `Auto`; pixel and unitless values pass through; other units
/// are converted. A percentage whose basis is `auto` (or not a length) yields
/// `Auto`.
pub fn resolve_absolute<H>(host: &H, node: NodeKey, property: Property) -> StyleValue
where
    H: VisualHost + ?Sized,
{
    let raw = host.computed_style(node, property.css_name());
    let text = raw.trim();
    if text.eq_ignore_ascii_case("auto") {
        return StyleValue::Auto;
    }
    let Ok(length) = parse_length_str(text) else {
        return StyleValue::Keyword(text.to_owned());
    };
    if length.unit == LengthUnit::Pixels {
        return StyleValue::Px(length.value);
    }
    let resolved = resolve_length(host, node, property, length);
    trace!("{node}: {property} {text} -> {resolved}");
    resolved
}

/// Resolve several properties at once.
pub fn resolve_absolute_many<H>(host: &H, node: NodeKey, properties: &[Property]) -> AbsoluteValues
where
    H: VisualHost + ?Sized,
{
    AbsoluteValues {
        values: properties
            .iter()
            .map(|&property| (property, resolve_absolute(host, node, property)))
            .collect(),
    }
}

fn resolve_length<H>(host: &H, node: NodeKey, property: Property, length: Length) -> StyleValue
where
    H: VisualHost + ?Sized,
{
    match length.unit {
        LengthUnit::Percent => resolve_percentage(host, node, property, length.value),
        LengthUnit::Ems => {
            let font_size = host.parent(node).map_or(DEFAULT_FONT_SIZE_PX, |parent| {
                resolve_absolute(host, parent, Property::FontSize).px_or(DEFAULT_FONT_SIZE_PX)
            });
            StyleValue::Px(length.value * font_size)
        }
        LengthUnit::RootEms => {
            let root = host.document_root();
            let root_font_size = if root == node {
                DEFAULT_FONT_SIZE_PX
            } else {
                resolve_absolute(host, root, Property::FontSize).px_or(DEFAULT_FONT_SIZE_PX)
            };
            StyleValue::Px(length.value * root_font_size)
        }
        _ => {
            let metrics = host.viewport();
            let viewport = Viewport {
                width_px: metrics.width(),
                height_px: metrics.height(),
            };
            compute_length_px(length, DEFAULT_FONT_SIZE_PX, DEFAULT_FONT_SIZE_PX, Some(viewport))
                .map_or(StyleValue::Px(length.value), StyleValue::Px)
        }
    }
}

fn resolve_percentage<H>(host: &H, node: NodeKey, property: Property, percent: f64) -> StyleValue
where
    H: VisualHost + ?Sized,
{
    let Some(basis) = property.percentage_basis() else {
        return StyleValue::Auto;
    };
    // Font size percentages refer to the parent element; everything else to the
    // containing block.
    let container = if basis == Property::FontSize {
        host.parent(node)
    } else {
        host.offset_parent(node)
    };
    let basis_px = match container {
        Some(container) => resolve_absolute(host, container, basis).as_px(),
        None => {
            let viewport = host.viewport();
            Some(match basis {
                Property::Height => viewport.height(),
                Property::FontSize => DEFAULT_FONT_SIZE_PX,
                _ => viewport.width(),
            })
        }
    };
    basis_px.map_or(StyleValue::Auto, |basis_px| {
        StyleValue::Px(percent * basis_px / 100.0)
    })
}
