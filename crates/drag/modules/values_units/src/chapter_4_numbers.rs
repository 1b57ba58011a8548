//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>

use crate::{ParseError, precise_number};
use cssparser::{Parser, Token};

/// A CSS <number>, kept at the precision it was written with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(pub f64);

/// Parse a CSS <number> (§4.2). Accepts integer or real numbers.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a `<number>`.
pub fn parse_number(input: &mut Parser) -> Result<Number, ParseError> {
    input.skip_whitespace();
    let start = input.position();
    let value = match input.next_including_whitespace_and_comments() {
        Ok(&Token::Number { value, .. }) => value,
        _ => return Err(ParseError::UnexpectedToken),
    };
    Ok(Number(precise_number(input.slice_from(start), 0, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cssparser::ParserInput;

    #[test]
    fn keeps_full_precision() {
        let mut source = ParserInput::new(" 0.7071067811865476");
        let mut input = Parser::new(&mut source);
        assert_eq!(parse_number(&mut input), Ok(Number(0.707_106_781_186_547_6)));
    }

    #[test]
    fn rejects_dimensions() {
        let mut source = ParserInput::new("3px");
        let mut input = Parser::new(&mut source);
        assert_eq!(parse_number(&mut input), Err(ParseError::UnexpectedToken));
    }
}
