//! Dot notation selectors (`.name`, `.*`)

use super::core::SelectorParser;
use crate::error::CompileError;
use crate::path::ast::PathSegment;
use crate::path::tokens::Token;

/// Parse the selector following a `.` or `..`
pub(super) fn parse_dot_selector(parser: &mut SelectorParser<'_>) -> Result<PathSegment, CompileError> {
    let offset = parser.offset();
    match parser.consume_token() {
        Token::Identifier(name) => Ok(PathSegment::ChildName(name)),
        // keywords are ordinary member names in dot position
        Token::True => Ok(PathSegment::ChildName("true".to_string())),
        Token::False => Ok(PathSegment::ChildName("false".to_string())),
        Token::Null => Ok(PathSegment::ChildName("null".to_string())),
        Token::Star => Ok(PathSegment::AnyChild),
        Token::EOF => Err(parser.error_at("expected member name after '.'", offset)),
        other => Err(parser.error_at(format!("expected member name, found {other}"), offset)),
    }
}
