//! Quoted string and regex literal tokenization
//!
//! Handles single and double quoted strings with JSON-style escapes,
//! including `\uXXXX` with UTF-16 surrogate pairs, and `/pattern/i`
//! regular expression literals.

use super::core::ExpressionLexer;
use crate::error::CompileError;
use crate::path::tokens::Token;

/// Parse a quoted string literal starting at the opening quote
pub(crate) fn parse_string_literal(
    lexer: &mut ExpressionLexer<'_>,
    start: usize,
) -> Result<usize, CompileError> {
    let quote = lexer.chars[start].1;
    let mut i = start + 1;
    let mut value = String::new();

    loop {
        let Some(c) = lexer.char_at(i) else {
            return Err(lexer.error("unterminated string literal", start));
        };
        if c == quote {
            break;
        }
        if c != '\\' {
            value.push(c);
            i += 1;
            continue;
        }

        i += 1;
        match lexer.char_at(i) {
            Some('"') => value.push('"'),
            Some('\'') => value.push('\''),
            Some('\\') => value.push('\\'),
            Some('/') => value.push('/'),
            Some('b') => value.push('\u{0008}'),
            Some('f') => value.push('\u{000C}'),
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some('t') => value.push('\t'),
            Some('u') => {
                let (c, next) = parse_unicode_escape(lexer, i)?;
                value.push(c);
                i = next;
                continue;
            }
            Some(_) => return Err(lexer.error("invalid escape sequence", i)),
            None => return Err(lexer.error("unterminated string literal", start)),
        }
        i += 1;
    }

    lexer.push(Token::String(value), start);
    Ok(i + 1)
}

/// Read four hex digits after the `u` at `index`
fn read_code_unit(lexer: &ExpressionLexer<'_>, index: usize) -> Result<u16, CompileError> {
    let mut unit: u16 = 0;
    for k in 1..=4 {
        let digit = lexer
            .char_at(index + k)
            .and_then(|c| c.to_digit(16))
            .ok_or_else(|| lexer.error("invalid \\u escape, expected 4 hex digits", index))?;
        unit = (unit << 4) | digit as u16;
    }
    Ok(unit)
}

/// Decode `\uXXXX` (and a trailing low surrogate when needed)
///
/// `index` points at the `u`; returns the decoded char and the index after the escape.
fn parse_unicode_escape(
    lexer: &ExpressionLexer<'_>,
    index: usize,
) -> Result<(char, usize), CompileError> {
    let high = read_code_unit(lexer, index)?;
    let after = index + 5;

    if !(0xD800..=0xDFFF).contains(&high) {
        let c = char::from_u32(u32::from(high))
            .ok_or_else(|| lexer.error("invalid unicode escape", index))?;
        return Ok((c, after));
    }
    if high >= 0xDC00 {
        return Err(lexer.error("unpaired low surrogate", index));
    }
    if lexer.char_at(after) != Some('\\') || lexer.char_at(after + 1) != Some('u') {
        return Err(lexer.error("unpaired high surrogate", index));
    }

    let low = read_code_unit(lexer, after + 1)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(lexer.error("invalid low surrogate", after + 1));
    }
    let code = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
    let c = char::from_u32(code).ok_or_else(|| lexer.error("invalid surrogate pair", index))?;
    Ok((c, after + 6))
}

/// Parse `/pattern/` with an optional trailing `i` flag
pub(crate) fn parse_regex_literal(
    lexer: &mut ExpressionLexer<'_>,
    start: usize,
) -> Result<usize, CompileError> {
    let mut i = start + 1;
    let mut pattern = String::new();

    loop {
        match lexer.char_at(i) {
            None => return Err(lexer.error("unterminated regular expression", start)),
            Some('/') => break,
            Some('\\') if lexer.char_at(i + 1) == Some('/') => {
                pattern.push('/');
                i += 2;
            }
            Some(c) => {
                pattern.push(c);
                i += 1;
            }
        }
    }
    i += 1;

    let case_insensitive = lexer.char_at(i) == Some('i');
    if case_insensitive {
        i += 1;
    }

    lexer.push(
        Token::Regex {
            pattern,
            case_insensitive,
        },
        start,
    );
    Ok(i)
}
