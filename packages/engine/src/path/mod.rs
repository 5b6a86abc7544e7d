//! Path expressions
//!
//! Compilation of JsonPath expressions into immutable [`CompiledPath`]s:
//! a tokenizer producing offset-tagged tokens, selector and filter parsers,
//! and a [`PathBuilder`] for constructing paths without text.

pub mod ast;
pub mod builder;
pub mod compiled;
pub mod compiler;
pub mod filter_parser;
pub mod selector_parser;
pub mod tokenizer;
pub mod tokens;

pub use ast::{ComparisonOp, FilterExpression, FilterValue, LogicalOp, PathSegment, PropertyStep};
pub use builder::PathBuilder;
pub use compiled::CompiledPath;
pub use compiler::{PathCompiler, compile};
