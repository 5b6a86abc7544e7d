//! Path expression tokenizer
//!
//! Converts raw expression text into a queue of [`SpannedToken`]s. Every
//! token records the byte offset it starts at so that compile errors can
//! point at the offending position.
//!
//! [`SpannedToken`]: super::tokens::SpannedToken

mod characters;
mod core;
mod numbers;
mod operators;
mod strings;

pub use core::ExpressionLexer;
