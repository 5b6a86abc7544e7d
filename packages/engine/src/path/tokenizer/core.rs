//! Core tokenizer loop

use std::collections::VecDeque;

use crate::error::{CompileError, compile_error};
use crate::path::tokens::{SpannedToken, Token};

/// Tokenizer over a single path expression
pub struct ExpressionLexer<'a> {
    pub(crate) input: &'a str,
    pub(crate) chars: Vec<(usize, char)>,
    pub(crate) tokens: VecDeque<SpannedToken>,
}

impl<'a> ExpressionLexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().collect(),
            tokens: VecDeque::new(),
        }
    }

    /// Tokenize the whole expression, terminating the queue with [`Token::EOF`]
    pub fn tokenize(mut self) -> Result<VecDeque<SpannedToken>, CompileError> {
        use super::{characters, numbers, operators, strings};

        let mut i = 0;
        while i < self.chars.len() {
            i = match self.chars[i].1 {
                ' ' | '\t' | '\n' | '\r' => i + 1,
                '\'' | '"' => strings::parse_string_literal(&mut self, i)?,
                '/' => strings::parse_regex_literal(&mut self, i)?,
                c if c.is_ascii_digit() || c == '-' => numbers::parse_number_literal(&mut self, i)?,
                '=' | '!' | '<' | '>' | '&' | '|' => operators::parse_operator(&mut self, i)?,
                _ => characters::parse_character_token(&mut self, i)?,
            };
        }

        let end = self.input.len();
        self.tokens.push_back(SpannedToken::new(Token::EOF, end));
        Ok(self.tokens)
    }

    /// Byte offset of the character at `index`, or the input length past the end
    #[inline]
    pub(crate) fn offset(&self, index: usize) -> usize {
        self.chars.get(index).map_or(self.input.len(), |(o, _)| *o)
    }

    #[inline]
    pub(crate) fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).map(|(_, c)| *c)
    }

    #[inline]
    pub(crate) fn push(&mut self, token: Token, index: usize) {
        let offset = self.offset(index);
        self.tokens.push_back(SpannedToken::new(token, offset));
    }

    pub(crate) fn error(&self, reason: impl Into<String>, index: usize) -> CompileError {
        compile_error(self.input, reason, self.offset(index))
    }
}
