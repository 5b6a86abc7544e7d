//! Single-character punctuation and identifier tokenization

use super::core::ExpressionLexer;
use crate::error::CompileError;
use crate::path::tokens::Token;

/// Parse punctuation, keywords and bare identifiers
pub(crate) fn parse_character_token(
    lexer: &mut ExpressionLexer<'_>,
    i: usize,
) -> Result<usize, CompileError> {
    let c = lexer.chars[i].1;
    let token = match c {
        '$' => Token::Root,
        '@' => Token::Current,
        '*' => Token::Star,
        '?' => Token::Question,
        ',' => Token::Comma,
        ':' => Token::Colon,
        '[' => Token::LeftBracket,
        ']' => Token::RightBracket,
        '(' => Token::LeftParen,
        ')' => Token::RightParen,
        '.' => {
            if lexer.char_at(i + 1) == Some('.') {
                lexer.push(Token::DoubleDot, i);
                return Ok(i + 2);
            }
            Token::Dot
        }
        c if is_identifier_start(c) => return Ok(parse_identifier(lexer, i)),
        c => return Err(lexer.error(format!("unexpected character '{c}'"), i)),
    };
    lexer.push(token, i);
    Ok(i + 1)
}

#[inline]
fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[inline]
fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-'
}

fn parse_identifier(lexer: &mut ExpressionLexer<'_>, start: usize) -> usize {
    let mut end = start;
    while lexer.char_at(end).is_some_and(is_identifier_continue) {
        end += 1;
    }

    let name: String = lexer.chars[start..end].iter().map(|(_, c)| *c).collect();
    let token = match name.as_str() {
        "true" => Token::True,
        "false" => Token::False,
        "null" => Token::Null,
        _ => Token::Identifier(name),
    };
    lexer.push(token, start);
    end
}
