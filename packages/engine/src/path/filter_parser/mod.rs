//! Filter expression parsing for `[?(...)]` predicates
//!
//! Precedence from lowest to highest: `||`, `&&`, `!`, comparison and
//! regex match, then primaries (`@` chains, literals, parentheses).

mod core;
mod expressions;
mod properties;

pub use core::FilterParser;
