//! Token definitions for path expression lexing

use std::fmt;

/// Lexical tokens of a path expression
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Root,
    Current,
    Dot,
    DoubleDot,
    Star,
    Question,
    Comma,
    Colon,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,

    Equal,
    NotEqual,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    RegexMatch,
    LogicalAnd,
    LogicalOr,
    Not,

    Identifier(String),
    String(String),
    Integer(i64),
    Number(f64),
    Regex { pattern: String, case_insensitive: bool },
    True,
    False,
    Null,

    EOF,
}

/// Token together with the byte offset where it starts in the expression
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

impl SpannedToken {
    #[inline]
    pub fn new(token: Token, offset: usize) -> Self {
        Self { token, offset }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Root => f.write_str("'$'"),
            Token::Current => f.write_str("'@'"),
            Token::Dot => f.write_str("'.'"),
            Token::DoubleDot => f.write_str("'..'"),
            Token::Star => f.write_str("'*'"),
            Token::Question => f.write_str("'?'"),
            Token::Comma => f.write_str("','"),
            Token::Colon => f.write_str("':'"),
            Token::LeftBracket => f.write_str("'['"),
            Token::RightBracket => f.write_str("']'"),
            Token::LeftParen => f.write_str("'('"),
            Token::RightParen => f.write_str("')'"),
            Token::Equal => f.write_str("'=='"),
            Token::NotEqual => f.write_str("'!='"),
            Token::Less => f.write_str("'<'"),
            Token::LessEq => f.write_str("'<='"),
            Token::Greater => f.write_str("'>'"),
            Token::GreaterEq => f.write_str("'>='"),
            Token::RegexMatch => f.write_str("'=~'"),
            Token::LogicalAnd => f.write_str("'&&'"),
            Token::LogicalOr => f.write_str("'||'"),
            Token::Not => f.write_str("'!'"),
            Token::Identifier(name) => write!(f, "identifier '{name}'"),
            Token::String(_) => f.write_str("string literal"),
            Token::Integer(i) => write!(f, "integer {i}"),
            Token::Number(n) => write!(f, "number {n}"),
            Token::Regex { .. } => f.write_str("regular expression"),
            Token::True => f.write_str("'true'"),
            Token::False => f.write_str("'false'"),
            Token::Null => f.write_str("'null'"),
            Token::EOF => f.write_str("end of expression"),
        }
    }
}
