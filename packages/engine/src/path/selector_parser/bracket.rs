//! Bracket selectors
//!
//! `['name']`, `['a','b']`, `[1]`, `[0,2]`, `[*]`, `[1:3]` and `[?(...)]`.
//! Unions must be homogeneous: all names or all indices.

use std::collections::BTreeSet;

use super::core::SelectorParser;
use super::slice::{non_negative, parse_slice};
use crate::error::CompileError;
use crate::path::ast::PathSegment;
use crate::path::filter_parser::FilterParser;
use crate::path::tokens::Token;

/// Parse the bracket contents; the `[` at `open_offset` is already consumed
pub(super) fn parse_bracket_selector(
    parser: &mut SelectorParser<'_>,
    open_offset: usize,
) -> Result<PathSegment, CompileError> {
    let offset = parser.offset();
    match parser.peek_token().clone() {
        Token::Star => {
            parser.consume_token();
            parser.expect_token(Token::RightBracket)?;
            Ok(PathSegment::AnyChild)
        }
        Token::Question => {
            parser.consume_token();
            let expression =
                FilterParser::new(parser.tokens, parser.input).parse_filter_expression()?;
            parser.expect_token(Token::RightBracket)?;
            Ok(PathSegment::Filter(expression))
        }
        Token::String(_) => parse_name_union(parser),
        Token::Integer(value) => {
            parser.consume_token();
            let first = non_negative(parser, value, offset)?;
            if *parser.peek_token() == Token::Colon {
                parse_slice(parser, Some(first))
            } else {
                parse_index_union(parser, first)
            }
        }
        Token::Colon => parse_slice(parser, None),
        Token::RightBracket => Err(parser.error_at("empty bracket selector", open_offset)),
        Token::EOF => Err(parser.error_at("unterminated bracket selector", open_offset)),
        other => Err(parser.error_at(format!("unexpected {other} in bracket selector"), offset)),
    }
}

fn parse_name_union(parser: &mut SelectorParser<'_>) -> Result<PathSegment, CompileError> {
    let mut names = Vec::new();
    loop {
        let offset = parser.offset();
        match parser.consume_token() {
            Token::String(name) => names.push(name),
            Token::Integer(_) => {
                return Err(parser.error_at(
                    "unions may not mix member names and array indices",
                    offset,
                ));
            }
            other => return Err(parser.error_at(format!("expected member name, found {other}"), offset)),
        }
        if !next_in_union(parser)? {
            break;
        }
    }

    if names.len() == 1 {
        Ok(PathSegment::ChildName(names.swap_remove(0)))
    } else {
        Ok(PathSegment::MultiSelectNames(names.into_iter().collect()))
    }
}

fn parse_index_union(parser: &mut SelectorParser<'_>, first: usize) -> Result<PathSegment, CompileError> {
    let mut indices = BTreeSet::from([first]);
    while next_in_union(parser)? {
        let offset = parser.offset();
        match parser.consume_token() {
            Token::Integer(value) => {
                indices.insert(non_negative(parser, value, offset)?);
            }
            Token::String(_) => {
                return Err(parser.error_at(
                    "unions may not mix member names and array indices",
                    offset,
                ));
            }
            other => return Err(parser.error_at(format!("expected array index, found {other}"), offset)),
        }
    }

    if indices.len() == 1 {
        Ok(PathSegment::ChildIndex(first))
    } else {
        Ok(PathSegment::MultiSelectIndices(indices))
    }
}

/// Consume `,` (more entries follow) or `]` (union complete)
fn next_in_union(parser: &mut SelectorParser<'_>) -> Result<bool, CompileError> {
    let offset = parser.offset();
    match parser.consume_token() {
        Token::Comma => Ok(true),
        Token::RightBracket => Ok(false),
        Token::EOF => Err(parser.error_at("unterminated bracket selector", offset)),
        other => Err(parser.error_at(format!("expected ',' or ']', found {other}"), offset)),
    }
}
