//! Array slice selectors (`[start:end:step]`)

use super::core::SelectorParser;
use crate::error::CompileError;
use crate::path::ast::PathSegment;
use crate::path::tokens::Token;

/// Parse a slice after its optional start bound has been read
///
/// The parser is positioned on the first `:`.
pub(super) fn parse_slice(
    parser: &mut SelectorParser<'_>,
    start: Option<usize>,
) -> Result<PathSegment, CompileError> {
    parser.expect_token(Token::Colon)?;
    let end = parse_bound(parser)?;

    let step = if *parser.peek_token() == Token::Colon {
        parser.consume_token();
        let offset = parser.offset();
        match parse_bound(parser)? {
            Some(0) => return Err(parser.error_at("slice step must be greater than zero", offset)),
            Some(step) => step,
            None => 1,
        }
    } else {
        1
    };

    parser.expect_token(Token::RightBracket)?;
    Ok(PathSegment::ArraySlice {
        start: start.unwrap_or(0),
        end,
        step,
    })
}

fn parse_bound(parser: &mut SelectorParser<'_>) -> Result<Option<usize>, CompileError> {
    let offset = parser.offset();
    match *parser.peek_token() {
        Token::Integer(value) => {
            parser.consume_token();
            non_negative(parser, value, offset).map(Some)
        }
        _ => Ok(None),
    }
}

/// Negative indices need the array length up front, which a stream never has
pub(super) fn non_negative(
    parser: &SelectorParser<'_>,
    value: i64,
    offset: usize,
) -> Result<usize, CompileError> {
    usize::try_from(value).map_err(|_| {
        parser.error_at(
            "negative array indices are not supported in streaming paths",
            offset,
        )
    })
}
