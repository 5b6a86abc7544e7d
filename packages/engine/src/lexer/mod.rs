//! Incremental JSON lexer
//!
//! A push-style tokenizer that accepts input in arbitrary chunks and yields
//! [`JsonEvent`]s one at a time. Every partially read token (string bytes,
//! escape progress, number text, literal prefix) is kept as explicit state,
//! so a chunk boundary may fall anywhere, including inside a multi-byte
//! UTF-8 sequence or a `\uXXXX` escape.

mod core;
pub mod event;
mod literals;
mod numbers;
mod strings;

pub use core::JsonLexer;
pub use event::{JsonEvent, ScalarValue};
