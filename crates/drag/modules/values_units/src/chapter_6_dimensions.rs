//! CSS Values & Units Level 3 — §6 Dimensions (Lengths)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

use crate::{ParseError, precise_number};
use cssparser::{Parser, ParserInput, Token};

/// CSS pixels per inch (§6.2.1: 1in = 96px).
pub const PX_PER_INCH: f64 = 96.0;

/// Length units understood by the resolver. `Percent` is carried here so a
/// computed value can be classified in one pass; it needs a basis to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Percent,
    Ems,
    RootEms,
    ViewportWidth,
    ViewportHeight,
    Centimeters,
    Millimeters,
    QuarterMillimeters,
    Inches,
    Points,
    Picas,
    /// Any other unit; its magnitude is taken as pixels.
    Unknown,
}

impl LengthUnit {
    /// Map a unit identifier (case-insensitive) to a unit.
    pub fn from_ident(unit: &str) -> Self {
        match unit.to_ascii_lowercase().as_str() {
            "px" => Self::Pixels,
            "%" => Self::Percent,
            "em" => Self::Ems,
            "rem" => Self::RootEms,
            "vw" => Self::ViewportWidth,
            "vh" => Self::ViewportHeight,
            "cm" => Self::Centimeters,
            "mm" => Self::Millimeters,
            "q" => Self::QuarterMillimeters,
            "in" => Self::Inches,
            "pt" => Self::Points,
            "pc" => Self::Picas,
            _ => Self::Unknown,
        }
    }

    /// Pixels per unit for absolute units (§6.2.1).
    pub fn px_per_unit(self) -> Option<f64> {
        match self {
            Self::Pixels | Self::Unknown => Some(1.0),
            Self::Inches => Some(PX_PER_INCH),
            Self::Centimeters => Some(PX_PER_INCH / 2.54),
            Self::Millimeters => Some(PX_PER_INCH / 25.4),
            Self::QuarterMillimeters => Some(PX_PER_INCH / 101.6),
            Self::Points => Some(PX_PER_INCH / 72.0),
            Self::Picas => Some(PX_PER_INCH / 6.0),
            Self::Percent
            | Self::Ems
            | Self::RootEms
            | Self::ViewportWidth
            | Self::ViewportHeight => None,
        }
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

impl Length {
    #[inline]
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixels,
        }
    }
}

/// Viewport metrics used to evaluate viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
}

/// Compute the pixel value for a given `Length` using the current environment.
///
/// - Absolute units: fixed ratios to the 96px inch.
/// - Ems/RootEms: scale by the provided font sizes.
/// - Viewport-relative (vw/vh): requires viewport.
/// - Percent: needs a property-specific basis; always `None` here.
pub fn compute_length_px(
    length: Length,
    font_size_px: f64,
    root_font_size_px: f64,
    viewport: Option<Viewport>,
) -> Option<f64> {
    if let Some(factor) = length.unit.px_per_unit() {
        return Some(length.value * factor);
    }
    match length.unit {
        LengthUnit::Ems => Some(length.value * font_size_px),
        LengthUnit::RootEms => Some(length.value * root_font_size_px),
        LengthUnit::ViewportWidth => {
            viewport.map(|viewport_metrics| length.value * viewport_metrics.width_px / 100.0)
        }
        LengthUnit::ViewportHeight => {
            viewport.map(|viewport_metrics| length.value * viewport_metrics.height_px / 100.0)
        }
        _ => None,
    }
}

/// Parse a CSS <length> or <percentage> (§6.2, §5.1).
///
/// A bare number is a pixel length; computed values such as `z-index` or a
/// zero offset are serialized that way.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not numeric.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    input.skip_whitespace();
    let start = input.position();
    let (fallback, unit, suffix_len) = match input.next_including_whitespace_and_comments() {
        Ok(Token::Dimension {
            value, unit: ident, ..
        }) => (*value, LengthUnit::from_ident(ident), ident.len()),
        Ok(&Token::Percentage { unit_value, .. }) => (unit_value * 100.0, LengthUnit::Percent, 1),
        Ok(&Token::Number { value, .. }) => (value, LengthUnit::Pixels, 0),
        _ => return Err(ParseError::UnexpectedToken),
    };
    Ok(Length {
        value: precise_number(input.slice_from(start), suffix_len, fallback),
        unit,
    })
}

/// Parse a complete string as a single length.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for non-numeric input and
/// `ParseError::TrailingInput` when anything follows the length.
pub fn parse_length_str(text: &str) -> Result<Length, ParseError> {
    let mut source = ParserInput::new(text);
    let mut input = Parser::new(&mut source);
    let length = parse_length(&mut input)?;
    input
        .expect_exhausted()
        .map_err(|_| ParseError::TrailingInput)?;
    Ok(length)
}
