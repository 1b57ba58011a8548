//! CSS Values and Units — lengths, percentages and their resolution to pixels.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the CSS Values table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;
pub mod resolve;

// Re-exports for ergonomic access from other crates.
pub use chapter_4_numbers::{Number, parse_number};
pub use chapter_6_dimensions::{
    Length, LengthUnit, Viewport, compute_length_px, parse_length, parse_length_str,
};
pub use resolve::{AbsoluteValues, Property, StyleValue, resolve_absolute, resolve_absolute_many};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
    /// Input remained after a complete value.
    TrailingInput,
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnexpectedToken => formatter.write_str("unexpected token"),
            Self::TrailingInput => formatter.write_str("unexpected trailing input"),
        }
    }
}

impl core::error::Error for ParseError {}

/// Recover the exact `f64` written in the source for a numeric token.
///
/// `cssparser` stores numeric values as `f32`; the token's source text keeps
/// the full precision. `suffix_len` is the byte length of the unit (or `%`)
/// that follows the number.
fn precise_number(source: &str, suffix_len: usize, fallback: f32) -> f64 {
    source
        .get(..source.len().saturating_sub(suffix_len))
        .and_then(|digits| digits.parse::<f64>().ok())
        .unwrap_or_else(|| f64::from(fallback))
}
