//! Comparison and logical operator tokenization

use super::core::ExpressionLexer;
use crate::error::CompileError;
use crate::path::tokens::Token;

/// Parse one or two character operators
pub(crate) fn parse_operator(lexer: &mut ExpressionLexer<'_>, i: usize) -> Result<usize, CompileError> {
    let first = lexer.chars[i].1;
    let second = lexer.char_at(i + 1);

    let (token, width) = match (first, second) {
        ('=', Some('=')) => (Token::Equal, 2),
        ('=', Some('~')) => (Token::RegexMatch, 2),
        ('!', Some('=')) => (Token::NotEqual, 2),
        ('!', _) => (Token::Not, 1),
        ('<', Some('=')) => (Token::LessEq, 2),
        ('<', _) => (Token::Less, 1),
        ('>', Some('=')) => (Token::GreaterEq, 2),
        ('>', _) => (Token::Greater, 1),
        ('&', Some('&')) => (Token::LogicalAnd, 2),
        ('|', Some('|')) => (Token::LogicalOr, 2),
        ('=', _) => return Err(lexer.error("single '=' is not an operator, use '=='", i)),
        ('&', _) => return Err(lexer.error("single '&' is not an operator, use '&&'", i)),
        _ => return Err(lexer.error("single '|' is not an operator, use '||'", i)),
    };

    lexer.push(token, i);
    Ok(i + width)
}
