//! Path expression compiler entry point

use crate::error::{CompileError, compile_error};
use crate::path::ast::PathSegment;
use crate::path::compiled::CompiledPath;
use crate::path::selector_parser::SelectorParser;
use crate::path::tokenizer::ExpressionLexer;
use crate::path::tokens::Token;

/// Compiles path expression text into [`CompiledPath`]s
pub struct PathCompiler;

impl PathCompiler {
    /// Compile an expression such as `$.store.book[*].author`
    ///
    /// # Errors
    ///
    /// Returns [`CompileError`] with the byte offset of the first offending
    /// token for empty input, a missing `$`, unterminated brackets or
    /// strings, a trailing `..`, mixed name/index unions, negative indices
    /// and malformed filters.
    pub fn compile(expression: &str) -> Result<CompiledPath, CompileError> {
        if expression.trim().is_empty() {
            return Err(compile_error(expression, "empty expression", 0));
        }

        let mut tokens = ExpressionLexer::new(expression).tokenize()?;

        let first = tokens.pop_front();
        match first.as_ref().map(|t| &t.token) {
            Some(Token::Root) => {}
            Some(Token::Current) => {
                return Err(compile_error(
                    expression,
                    "'@' is only valid inside filter expressions",
                    first.map_or(0, |t| t.offset),
                ));
            }
            _ => {
                return Err(compile_error(
                    expression,
                    "path must start with '$'",
                    first.map_or(0, |t| t.offset),
                ));
            }
        }

        let mut segments = vec![PathSegment::Root];
        let mut parser = SelectorParser::new(&mut tokens, expression);
        while *parser.peek_token() != Token::EOF {
            parser.parse_into(&mut segments)?;
        }

        tracing::debug!(
            target: "jsurf::compiler",
            expression,
            segments = segments.len(),
            "compiled path"
        );

        Ok(CompiledPath::new(segments, expression.to_string()))
    }
}

/// Compile an expression; shorthand for [`PathCompiler::compile`]
#[inline]
pub fn compile(expression: &str) -> Result<CompiledPath, CompileError> {
    PathCompiler::compile(expression)
}
