//! Logical, comparison and primary expression parsing

use super::core::FilterParser;
use crate::error::CompileError;
use crate::path::ast::{FilterExpression, FilterValue, LogicalOp, RegexPattern};
use crate::path::tokens::Token;

impl FilterParser<'_> {
    /// Parse logical OR expressions (lowest precedence)
    pub(super) fn parse_logical_or(&mut self) -> Result<FilterExpression, CompileError> {
        let mut left = self.parse_logical_and()?;

        while *self.peek_token() == Token::LogicalOr {
            self.consume_token();
            let right = self.parse_logical_and()?;
            left = FilterExpression::Logical {
                left: Box::new(left),
                operator: LogicalOp::Or,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    pub(super) fn parse_logical_and(&mut self) -> Result<FilterExpression, CompileError> {
        let mut left = self.parse_unary()?;

        while *self.peek_token() == Token::LogicalAnd {
            self.consume_token();
            let right = self.parse_unary()?;
            left = FilterExpression::Logical {
                left: Box::new(left),
                operator: LogicalOp::And,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<FilterExpression, CompileError> {
        if *self.peek_token() == Token::Not {
            self.consume_token();
            let operand = self.parse_unary()?;
            return Ok(FilterExpression::Not {
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    /// Parse comparison and regex-match expressions
    pub(super) fn parse_comparison(&mut self) -> Result<FilterExpression, CompileError> {
        let left = self.parse_primary()?;

        if *self.peek_token() == Token::RegexMatch {
            self.consume_token();
            return self.parse_regex(left);
        }

        match self.parse_comparison_operator() {
            Some(operator) => {
                let right = self.parse_primary()?;
                Ok(FilterExpression::Comparison {
                    left: Box::new(left),
                    operator,
                    right: Box::new(right),
                })
            }
            None => Ok(left),
        }
    }

    fn parse_regex(&mut self, target: FilterExpression) -> Result<FilterExpression, CompileError> {
        let offset = self.offset();
        match self.consume_token() {
            Token::Regex {
                pattern,
                case_insensitive,
            } => {
                let regex = regex::RegexBuilder::new(&pattern)
                    .case_insensitive(case_insensitive)
                    .build()
                    .map_err(|e| self.error_at(format!("invalid regular expression: {e}"), offset))?;
                Ok(FilterExpression::Regex {
                    target: Box::new(target),
                    pattern: RegexPattern::new(pattern, case_insensitive, regex),
                })
            }
            other => Err(self.error_at(
                format!("expected regular expression after '=~', found {other}"),
                offset,
            )),
        }
    }

    /// Parse primary expressions (property access, literals, parentheses)
    pub(super) fn parse_primary(&mut self) -> Result<FilterExpression, CompileError> {
        let offset = self.offset();
        let value = match self.consume_token() {
            Token::Current => return self.parse_property_access(),
            Token::LeftParen => {
                let expr = self.parse_logical_or()?;
                self.expect_token(Token::RightParen)?;
                return Ok(expr);
            }
            Token::String(s) => FilterValue::String(s),
            Token::Integer(i) => FilterValue::Integer(i),
            Token::Number(n) => FilterValue::Number(n),
            Token::True => FilterValue::Boolean(true),
            Token::False => FilterValue::Boolean(false),
            Token::Null => FilterValue::Null,
            Token::Root => {
                return Err(self.error_at(
                    "absolute paths are not supported inside filters",
                    offset,
                ));
            }
            Token::Identifier(name) => {
                return Err(self.error_at(format!("unexpected identifier '{name}' in filter"), offset));
            }
            Token::EOF => return Err(self.error_at("unterminated filter expression", offset)),
            other => {
                return Err(self.error_at(
                    format!("expected '@', literal or '(' in filter, found {other}"),
                    offset,
                ));
            }
        };
        Ok(FilterExpression::Literal { value })
    }
}
