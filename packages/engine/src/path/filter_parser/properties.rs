//! Property chains below the current node (`@.a.b`, `@['a'][0]`)

use super::core::FilterParser;
use crate::error::CompileError;
use crate::path::ast::{FilterExpression, PropertyStep};
use crate::path::tokens::Token;

impl FilterParser<'_> {
    /// Parse the chain following `@`; a bare `@` is the candidate itself
    pub(super) fn parse_property_access(&mut self) -> Result<FilterExpression, CompileError> {
        let mut path = Vec::new();

        loop {
            match self.peek_token() {
                Token::Dot => {
                    self.consume_token();
                    let offset = self.offset();
                    match self.consume_token() {
                        Token::Identifier(name) => path.push(PropertyStep::Name(name)),
                        Token::True => path.push(PropertyStep::Name("true".to_string())),
                        Token::False => path.push(PropertyStep::Name("false".to_string())),
                        Token::Null => path.push(PropertyStep::Name("null".to_string())),
                        other => {
                            return Err(self.error_at(
                                format!("expected property name after '.', found {other}"),
                                offset,
                            ));
                        }
                    }
                }
                Token::LeftBracket => {
                    self.consume_token();
                    let offset = self.offset();
                    match self.consume_token() {
                        Token::String(name) => path.push(PropertyStep::Name(name)),
                        Token::Integer(i) => {
                            let index = usize::try_from(i).map_err(|_| {
                                self.error_at("negative array indices are not supported", offset)
                            })?;
                            path.push(PropertyStep::Index(index));
                        }
                        other => {
                            return Err(self.error_at(
                                format!("expected property name or index, found {other}"),
                                offset,
                            ));
                        }
                    }
                    self.expect_token(Token::RightBracket)?;
                }
                Token::DoubleDot => {
                    let offset = self.offset();
                    return Err(self.error_at(
                        "recursive descent is not supported inside filters",
                        offset,
                    ));
                }
                _ => break,
            }
        }

        if path.is_empty() {
            Ok(FilterExpression::Current)
        } else {
            Ok(FilterExpression::Property { path })
        }
    }
}
