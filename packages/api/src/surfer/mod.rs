//! `JsonSurfer` façade
//!
//! Wraps configuration, session creation and the common collect patterns
//! behind a single entry point parameterized by the value provider.

mod collect;
mod core;
mod iterator;

pub use core::JsonSurfer;
pub use iterator::SurfingIterator;
