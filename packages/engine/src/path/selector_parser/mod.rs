//! Selector parsing
//!
//! Turns the token queue into [`PathSegment`](super::ast::PathSegment)s:
//! dot selectors, bracket selectors (names, indices, unions, slices and
//! filters) and recursive descent.

mod bracket;
mod core;
mod dot;
mod slice;

pub use core::SelectorParser;
