//! Core selector parser structure and dispatch

use std::collections::VecDeque;

use crate::error::{CompileError, compile_error};
use crate::path::ast::PathSegment;
use crate::path::tokens::{SpannedToken, Token};

/// Parser for the segments following the root identifier
pub struct SelectorParser<'a> {
    pub(super) tokens: &'a mut VecDeque<SpannedToken>,
    pub(super) input: &'a str,
}

impl<'a> SelectorParser<'a> {
    #[inline]
    pub fn new(tokens: &'a mut VecDeque<SpannedToken>, input: &'a str) -> Self {
        Self { tokens, input }
    }

    /// Parse the next selector, appending one or two segments
    ///
    /// Recursive descent pushes both [`PathSegment::RecursiveDescent`] and
    /// the concrete segment that must follow it.
    pub fn parse_into(&mut self, segments: &mut Vec<PathSegment>) -> Result<(), CompileError> {
        let offset = self.offset();
        match self.consume_token() {
            Token::Dot => {
                segments.push(super::dot::parse_dot_selector(self)?);
                Ok(())
            }
            Token::DoubleDot => {
                segments.push(PathSegment::RecursiveDescent);
                segments.push(self.parse_descent_target(offset)?);
                Ok(())
            }
            Token::LeftBracket => {
                segments.push(super::bracket::parse_bracket_selector(self, offset)?);
                Ok(())
            }
            Token::Root => Err(self.error_at("'$' may only appear at the start of a path", offset)),
            Token::Current => Err(self.error_at(
                "'@' is only valid inside filter expressions",
                offset,
            )),
            Token::Identifier(name) => Err(self.error_at(
                format!("expected '.' or '[' before '{name}'"),
                offset,
            )),
            other => Err(self.error_at(format!("unexpected {other}"), offset)),
        }
    }

    /// Concrete selector required right after `..`
    fn parse_descent_target(&mut self, descent_offset: usize) -> Result<PathSegment, CompileError> {
        let offset = self.offset();
        match self.peek_token() {
            Token::Identifier(_) | Token::True | Token::False | Token::Null | Token::Star => {
                super::dot::parse_dot_selector(self)
            }
            Token::LeftBracket => {
                self.consume_token();
                super::bracket::parse_bracket_selector(self, offset)
            }
            Token::EOF => Err(self.error_at(
                "recursive descent must be followed by a selector",
                descent_offset,
            )),
            other => Err(self.error_at(format!("unexpected {other} after '..'"), offset)),
        }
    }

    #[inline]
    pub(crate) fn peek_token(&self) -> &Token {
        self.tokens.front().map_or(&Token::EOF, |t| &t.token)
    }

    /// Offset of the next token
    #[inline]
    pub(super) fn offset(&self) -> usize {
        self.tokens.front().map_or(self.input.len(), |t| t.offset)
    }

    #[inline]
    pub(super) fn consume_token(&mut self) -> Token {
        self.tokens.pop_front().map_or(Token::EOF, |t| t.token)
    }

    /// Consume `expected` or fail pointing at whatever is there instead
    pub(super) fn expect_token(&mut self, expected: Token) -> Result<(), CompileError> {
        let offset = self.offset();
        let actual = self.consume_token();
        if actual == expected {
            Ok(())
        } else {
            Err(self.error_at(format!("expected {expected}, found {actual}"), offset))
        }
    }

    #[inline]
    pub(super) fn error_at(&self, reason: impl Into<String>, offset: usize) -> CompileError {
        compile_error(self.input, reason, offset)
    }
}
