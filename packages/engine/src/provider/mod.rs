//! Value model abstraction
//!
//! Matched values are assembled through a [`JsonProvider`] so callers can
//! receive them in whatever tree representation they work with. The
//! default, [`SerdeJsonProvider`], builds [`serde_json::Value`]s.

mod assembler;
mod serde_value;

pub use assembler::ValueAssembler;
pub use serde_value::SerdeJsonProvider;

use crate::lexer::ScalarValue;

/// Constructs values of some tree model
pub trait JsonProvider {
    /// Value type handed to listeners and collected results
    type Value: Clone + std::fmt::Debug + 'static;

    fn create_object(&self) -> Self::Value;

    fn create_array(&self) -> Self::Value;

    /// Insert `value` under `key` into an object created by this provider
    fn put(&self, object: &mut Self::Value, key: String, value: Self::Value);

    /// Append `value` to an array created by this provider
    fn add(&self, array: &mut Self::Value, value: Self::Value);

    fn primitive(&self, scalar: ScalarValue) -> Self::Value;
}
