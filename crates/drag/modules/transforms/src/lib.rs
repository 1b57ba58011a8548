//! CSS Transforms — translation component of `matrix()` / `matrix3d()` values.
//! Spec: <https://www.w3.org/TR/css-transforms-1/#mathematical-description>
//! Spec: <https://www.w3.org/TR/css-transforms-2/#funcdef-matrix3d>
//!
//! A computed `transform` is serialized by hosts as a single matrix function.
//! Dragging in transform mode only ever touches the translation, so the matrix
//! is kept as its ordered list of components and every other component is
//! written back exactly as it was read.

#![forbid(unsafe_code)]

use core::fmt;

use cssparser::{Parser, ParserInput};
use drag_host::{Coordinate, NodeKey, StyleMutation, VisualHost};
use drag_values_units::{Number, parse_number};
use log::{debug, trace};

/// Component order as written in CSS.
///
/// ```text
/// matrix(a, b, c, d, e, f)            translation = (e, f)     indices 4, 5
/// matrix3d(m11, m12, ..., m44)        translation = (m41, m42) indices 12, 13
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformMatrix {
    Matrix2D([f64; 6]),
    Matrix3D([f64; 16]),
}

impl TransformMatrix {
    /// `matrix(1, 0, 0, 1, 0, 0)`.
    pub const IDENTITY: Self = Self::Matrix2D([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    const TRANSLATE_2D: (usize, usize) = (4, 5);
    const TRANSLATE_3D: (usize, usize) = (12, 13);

    /// Parse a computed transform. Returns `None` for `none` and for anything
    /// that is not exactly one `matrix()`/`matrix3d()` with the right arity.
    pub fn parse(text: &str) -> Option<Self> {
        let mut source = ParserInput::new(text);
        let mut input = Parser::new(&mut source);
        let name = input.expect_function().ok()?.clone();
        let components = input.parse_nested_block(parse_components).ok()?;
        input.expect_exhausted().ok()?;

        if name.eq_ignore_ascii_case("matrix") {
            <[f64; 6]>::try_from(components.as_slice())
                .ok()
                .map(Self::Matrix2D)
        } else if name.eq_ignore_ascii_case("matrix3d") {
            <[f64; 16]>::try_from(components.as_slice())
                .ok()
                .map(Self::Matrix3D)
        } else {
            None
        }
    }

    pub fn components(&self) -> &[f64] {
        match self {
            Self::Matrix2D(values) => values,
            Self::Matrix3D(values) => values,
        }
    }

    const fn translation_indices(&self) -> (usize, usize) {
        match self {
            Self::Matrix2D(_) => Self::TRANSLATE_2D,
            Self::Matrix3D(_) => Self::TRANSLATE_3D,
        }
    }

    pub fn translation(&self) -> Coordinate {
        let (x_index, y_index) = self.translation_indices();
        let values = self.components();
        Coordinate::new(values[x_index], values[y_index])
    }

    /// Replace the x/y translation; z translation, scale, rotation, skew and
    /// the perspective row are left untouched.
    pub fn set_translation(&mut self, translation: Coordinate) {
        let (x_index, y_index) = self.translation_indices();
        let values: &mut [f64] = match self {
            Self::Matrix2D(values) => values,
            Self::Matrix3D(values) => values,
        };
        values[x_index] = translation.x;
        values[y_index] = translation.y;
    }

    #[must_use]
    pub fn with_translation(mut self, translation: Coordinate) -> Self {
        self.set_translation(translation);
        self
    }
}

impl fmt::Display for TransformMatrix {
    /// Serializes each component with the shortest text that parses back to
    /// the same `f64`.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Matrix2D(_) => "matrix",
            Self::Matrix3D(_) => "matrix3d",
        };
        write!(formatter, "{name}(")?;
        for (index, value) in self.components().iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{value}")?;
        }
        formatter.write_str(")")
    }
}

fn parse_components<'i>(
    args: &mut Parser<'i, '_>,
) -> Result<Vec<f64>, cssparser::ParseError<'i, ()>> {
    let mut values = Vec::with_capacity(16);
    loop {
        let Ok(Number(value)) = parse_number(args) else {
            return Err(args.new_custom_error(()));
        };
        values.push(value);
        if args.is_exhausted() {
            return Ok(values);
        }
        args.expect_comma()?;
    }
}

/// Result of reading an element's translation at drag start.
#[derive(Clone, Debug, PartialEq)]
pub struct TranslationRead {
    pub offset: Coordinate,
    /// The matrix subsequent writes update.
    pub matrix: TransformMatrix,
    /// Initialization to apply before the first write; empty when the element
    /// already had a matrix.
    pub mutation: StyleMutation,
}

/// Read the current translation of `node` through the `accessor` property
/// (`transform` or a vendor-prefixed variant).
///
/// Without a matrix the translation is zero and `mutation` installs an
/// explicit identity matrix so later writes have one to target.
pub fn read_translation<H>(host: &H, node: NodeKey, accessor: &str) -> TranslationRead
where
    H: VisualHost + ?Sized,
{
    let computed = host.computed_style(node, accessor);
    if let Some(matrix) = TransformMatrix::parse(&computed) {
        let offset = matrix.translation();
        trace!("{node}: {accessor} {computed} translates by ({}, {})", offset.x, offset.y);
        return TranslationRead {
            offset,
            matrix,
            mutation: StyleMutation::new(),
        };
    }
    debug!("{node}: no transform matrix in {computed:?}, initializing identity");
    TranslationRead {
        offset: Coordinate::ORIGIN,
        matrix: TransformMatrix::IDENTITY,
        mutation: StyleMutation::new().with(accessor, TransformMatrix::IDENTITY.to_string()),
    }
}

/// Move `matrix`'s translation to `offset` and write it to `node`.
///
/// # Errors
/// Returns the host's error if the style write fails.
pub fn write_translation<H>(
    host: &mut H,
    node: NodeKey,
    accessor: &str,
    matrix: &mut TransformMatrix,
    offset: Coordinate,
) -> anyhow::Result<()>
where
    H: VisualHost + ?Sized,
{
    matrix.set_translation(offset);
    host.set_style_property(node, accessor, &matrix.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::error::Error;
    use drag_host::HeadlessHost;

    #[test]
    fn parses_2d_matrix_translation() {
        let matrix = TransformMatrix::parse("matrix(1, 0, 0, 1, 10.5, -20)");
        assert_eq!(
            matrix.map(|parsed| parsed.translation()),
            Some(Coordinate::new(10.5, -20.0))
        );
    }

    #[test]
    fn parses_3d_matrix_translation() {
        let text = "MATRIX3D(1,0,0,0, 0,1,0,0, 0,0,1,0, 7,8,9,1)";
        let matrix = TransformMatrix::parse(text);
        assert_eq!(
            matrix.map(|parsed| parsed.translation()),
            Some(Coordinate::new(7.0, 8.0))
        );
    }

    #[test]
    fn rejects_non_matrix_values() {
        assert_eq!(TransformMatrix::parse("none"), None);
        assert_eq!(TransformMatrix::parse(""), None);
        assert_eq!(TransformMatrix::parse("translate(1px, 2px)"), None);
        assert_eq!(TransformMatrix::parse("matrix(1, 0, 0, 1, 0)"), None);
        assert_eq!(TransformMatrix::parse("matrix(1, 0, 0, 1, 0, 0) scale(2)"), None);
        assert_eq!(TransformMatrix::parse("matrix(1, 0, 0, 1, 0px, 0)"), None);
    }

    #[test]
    fn set_translation_preserves_other_components() -> Result<(), Box<dyn Error>> {
        let original = "matrix3d(0.7071067811865476, 0.7071067811865475, 0, 0, \
                        -0.7071067811865475, 0.7071067811865476, 0, 0, \
                        0, 0, 1, 0.001, 3, 4, 12.25, 1)";
        let parsed = TransformMatrix::parse(original).ok_or("matrix3d should parse")?;
        let moved = parsed.with_translation(Coordinate::new(-15.5, 1e-3));

        assert_eq!(moved.translation(), Coordinate::new(-15.5, 0.001));
        for (index, (before, after)) in parsed
            .components()
            .iter()
            .zip(moved.components())
            .enumerate()
        {
            if index == 12 || index == 13 {
                continue;
            }
            assert_eq!(before.to_bits(), after.to_bits(), "component {index} changed");
        }
        Ok(())
    }

    #[test]
    fn serialization_reparses_bit_identically() -> Result<(), Box<dyn Error>> {
        let matrix = TransformMatrix::Matrix2D([
            0.866_025_403_784_438_6,
            0.5,
            -0.5,
            0.866_025_403_784_438_6,
            1.0 / 3.0,
            -0.0,
        ]);
        let text = matrix.to_string();
        let reparsed = TransformMatrix::parse(&text).ok_or("serialized matrix should parse")?;
        for (before, after) in matrix.components().iter().zip(reparsed.components()) {
            assert_eq!(before.to_bits(), after.to_bits(), "{text}");
        }
        Ok(())
    }

    #[test]
    fn missing_matrix_requests_identity_initialization() {
        let mut host = HeadlessHost::new();
        let node = host.append_child(NodeKey::ROOT);
        let read = read_translation(&host, node, "transform");
        assert_eq!(read.offset, Coordinate::ORIGIN);
        assert_eq!(read.matrix, TransformMatrix::IDENTITY);
        assert_eq!(read.mutation.get("transform"), Some("matrix(1, 0, 0, 1, 0, 0)"));
        host.set_computed(node, "transform", "matrix(2, 0, 0, 2, 4, 5)");
        assert!(read_translation(&host, node, "transform").mutation.is_empty());
    }

    #[test]
    fn write_then_read_round_trips() -> anyhow::Result<()> {
        let mut host = HeadlessHost::new();
        let node = host.append_child(NodeKey::ROOT);
        host.set_computed(node, "-webkit-transform", "matrix(2, 0.25, 0, 2, 4, 5)");
        let mut read = read_translation(&host, node, "-webkit-transform");
        write_translation(
            &mut host,
            node,
            "-webkit-transform",
            &mut read.matrix,
            Coordinate::new(33.75, -8.0),
        )?;
        let again = read_translation(&host, node, "-webkit-transform");
        assert_eq!(again.offset, Coordinate::new(33.75, -8.0));
        assert_eq!(
            host.style_property(node, "-webkit-transform"),
            "matrix(2, 0.25, 0, 2, 33.75, -8)"
        );
        Ok(())
    }
}
