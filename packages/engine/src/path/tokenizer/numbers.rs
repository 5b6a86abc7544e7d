//! Numeric literal tokenization

use super::core::ExpressionLexer;
use crate::error::CompileError;
use crate::path::tokens::Token;

/// Parse an integer or decimal literal, with optional leading minus
pub(crate) fn parse_number_literal(
    lexer: &mut ExpressionLexer<'_>,
    start: usize,
) -> Result<usize, CompileError> {
    let mut i = start;
    if lexer.char_at(i) == Some('-') {
        i += 1;
    }

    let digits_start = i;
    while lexer.char_at(i).is_some_and(|c| c.is_ascii_digit()) {
        i += 1;
    }
    if i == digits_start {
        return Err(lexer.error("expected digits after '-'", start));
    }

    let mut is_decimal = false;
    if lexer.char_at(i) == Some('.') && lexer.char_at(i + 1).is_some_and(|c| c.is_ascii_digit()) {
        is_decimal = true;
        i += 1;
        while lexer.char_at(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
    }
    if matches!(lexer.char_at(i), Some('e' | 'E')) {
        is_decimal = true;
        i += 1;
        if matches!(lexer.char_at(i), Some('+' | '-')) {
            i += 1;
        }
        let exp_start = i;
        while lexer.char_at(i).is_some_and(|c| c.is_ascii_digit()) {
            i += 1;
        }
        if i == exp_start {
            return Err(lexer.error("missing exponent digits", start));
        }
    }

    let text = &lexer.input[lexer.offset(start)..lexer.offset(i)];
    let token = if is_decimal {
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| lexer.error(format!("invalid number '{text}'"), start))?
    } else {
        text.parse::<i64>()
            .map(Token::Integer)
            .map_err(|_| lexer.error(format!("integer '{text}' out of range"), start))?
    };

    lexer.push(token, start);
    Ok(i)
}
