//! Filter predicate evaluation
//!
//! Predicates are evaluated against a fully assembled candidate value. The
//! engine assembles candidates incrementally while the document streams and
//! calls [`FilterEvaluator::evaluate_predicate`] once the candidate closes.

mod comparison;
mod core;

pub use comparison::ValueComparator;
pub use core::{FilterEvaluator, is_truthy};
