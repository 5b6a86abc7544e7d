//! Core filter parser structure

use std::collections::VecDeque;

use crate::error::{CompileError, compile_error};
use crate::path::ast::{ComparisonOp, FilterExpression};
use crate::path::tokens::{SpannedToken, Token};

/// Parser for filter predicates, sharing the token queue with the selector parser
pub struct FilterParser<'a> {
    pub(super) tokens: &'a mut VecDeque<SpannedToken>,
    pub(super) input: &'a str,
}

impl<'a> FilterParser<'a> {
    #[inline]
    pub fn new(tokens: &'a mut VecDeque<SpannedToken>, input: &'a str) -> Self {
        Self { tokens, input }
    }

    /// Parse a complete filter expression, stopping before the closing `]`
    #[inline]
    pub fn parse_filter_expression(&mut self) -> Result<FilterExpression, CompileError> {
        self.parse_logical_or()
    }

    /// Consume a comparison operator if one is next
    pub(super) fn parse_comparison_operator(&mut self) -> Option<ComparisonOp> {
        let operator = match self.peek_token() {
            Token::Equal => ComparisonOp::Equal,
            Token::NotEqual => ComparisonOp::NotEqual,
            Token::Less => ComparisonOp::Less,
            Token::LessEq => ComparisonOp::LessEq,
            Token::Greater => ComparisonOp::Greater,
            Token::GreaterEq => ComparisonOp::GreaterEq,
            _ => return None,
        };
        self.consume_token();
        Some(operator)
    }

    #[inline]
    pub(super) fn peek_token(&self) -> &Token {
        self.tokens.front().map_or(&Token::EOF, |t| &t.token)
    }

    #[inline]
    pub(super) fn offset(&self) -> usize {
        self.tokens.front().map_or(self.input.len(), |t| t.offset)
    }

    #[inline]
    pub(super) fn consume_token(&mut self) -> Token {
        self.tokens.pop_front().map_or(Token::EOF, |t| t.token)
    }

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
