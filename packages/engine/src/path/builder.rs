//! Programmatic path construction
//!
//! ```
//! use jsurf_engine::path::PathBuilder;
//!
//! let path = PathBuilder::root().scan().child("book").index(1).build().unwrap();
//! assert_eq!(path, jsurf_engine::path::compile("$..book[1]").unwrap());
//! ```

use std::collections::BTreeSet;

use crate::error::{CompileError, compile_error};
use crate::path::ast::PathSegment;
use crate::path::compiled::CompiledPath;
use crate::path::filter_parser::FilterParser;
use crate::path::tokenizer::ExpressionLexer;
use crate::path::tokens::Token;

/// Fluent builder producing the same [`CompiledPath`] the compiler would
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until build() is called"]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
}

impl PathBuilder {
    /// Start at `$`
    pub fn root() -> Self {
        Self {
            segments: vec![PathSegment::Root],
        }
    }

    pub fn child(mut self, name: impl Into<String>) -> Self {
        self.segments.push(PathSegment::ChildName(name.into()));
        self
    }

    pub fn children<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        let segment = if names.len() == 1 {
            PathSegment::ChildName(names.into_iter().next().unwrap_or_default())
        } else {
            PathSegment::MultiSelectNames(names)
        };
        self.segments.push(segment);
        self
    }

    pub fn any_child(mut self) -> Self {
        self.segments.push(PathSegment::AnyChild);
        self
    }

    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(PathSegment::ChildIndex(index));
        self
    }

    pub fn indices(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        let indices: BTreeSet<usize> = indices.into_iter().collect();
        let segment = match indices.first() {
            Some(&only) if indices.len() == 1 => PathSegment::ChildIndex(only),
            _ => PathSegment::MultiSelectIndices(indices),
        };
        self.segments.push(segment);
        self
    }

    /// `[start:end:step]`; a zero step is rejected by [`build`](Self::build)
    pub fn slice(mut self, start: usize, end: Option<usize>, step: usize) -> Self {
        self.segments.push(PathSegment::ArraySlice { start, end, step });
        self
    }

    /// Recursive descent (`..`); must be followed by a concrete selector
    pub fn scan(mut self) -> Self {
        self.segments.push(PathSegment::RecursiveDescent);
        self
    }

    /// Append a filter segment from predicate text such as `@.price < 10`
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] positioned within `predicate` when it does not parse.
    pub fn filter(mut self, predicate: &str) -> Result<Self, CompileError> {
        let mut tokens = ExpressionLexer::new(predicate).tokenize()?;
        let expression = FilterParser::new(&mut tokens, predicate).parse_filter_expression()?;
        if let Some(rest) = tokens.front().filter(|t| t.token != Token::EOF) {
            return Err(compile_error(
                predicate,
                format!("unexpected {} after filter", rest.token),
                rest.offset,
            ));
        }
        self.segments.push(PathSegment::Filter(expression));
        Ok(self)
    }

    /// Validate and freeze the path
    ///
    /// # Errors
    ///
    /// Fails for a trailing or doubled recursive descent, empty unions and zero slice steps.
    pub fn build(self) -> Result<CompiledPath, CompileError> {
        let expression: String = self.segments.iter().map(ToString::to_string).collect();

        for (i, segment) in self.segments.iter().enumerate() {
            let invalid = match segment {
                PathSegment::RecursiveDescent => !self
                    .segments
                    .get(i + 1)
                    .is_some_and(PathSegment::is_concrete),
                PathSegment::Root => i != 0,
                PathSegment::MultiSelectNames(names) => names.is_empty(),
                PathSegment::MultiSelectIndices(indices) => indices.is_empty(),
                PathSegment::ArraySlice { step, .. } => *step == 0,
                _ => false,
            };
            if invalid {
                let offset = self.segments[..i].iter().map(|s| s.to_string().len()).sum();
                return Err(compile_error(
                    &expression,
                    format!("invalid segment {segment}"),
                    offset,
                ));
            }
        }

        Ok(CompiledPath::new(self.segments, expression))
    }
}

impl Default for PathBuilder {
    fn default() -> Self {
        Self::root()
    }
}
