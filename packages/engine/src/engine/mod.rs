//! Surfing engine
//!
//! Consumes structural events, drives the matcher automaton, assembles
//! matched values and dispatches them to bindings. The engine owns no
//! input; sessions feed it events from a [`JsonLexer`](crate::lexer::JsonLexer)
//! and call [`SurfingEngine::dispatch`] before every new event so that a
//! pause or stop takes effect before the next token is consumed.

mod capture;
mod context;
mod core;
mod dispatch;
mod frame;

pub use context::{MatchLocation, ParsingContext, TransientStore};
pub use core::SurfingEngine;
pub use dispatch::Flow;
