//! # jsurf engine
//!
//! Streaming JsonPath evaluation over JSON documents of any size. The
//! document is read once, token by token, and values matching registered
//! paths are assembled and delivered as soon as they complete, without
//! ever materializing the whole tree.
//!
//! ## Layers
//!
//! - [`path`]: compiles expressions such as `$.store.book[?(@.price < 10)].title`
//! - [`lexer`]: incremental tokenizer tolerating arbitrary chunk boundaries
//! - [`matcher`]: automaton tracking live paths per open container
//! - [`engine`]: value assembly, filter resolution and listener dispatch
//! - [`session`]: reader-backed resumable and push-fed non-blocking sessions
//!
//! ## Usage
//!
//! ```
//! use jsurf_engine::config::SurfingConfigBuilder;
//! use jsurf_engine::provider::SerdeJsonProvider;
//! use jsurf_engine::session::ResumableParser;
//!
//! let json = br#"{"store": {"book": [{"title": "A"}, {"title": "B"}]}}"#;
//! let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
//! let titles = builder.collect_all("$.store.book[*].title").unwrap();
//! let mut parser = ResumableParser::new(&json[..], builder.build().unwrap());
//! parser.parse().unwrap();
//! assert_eq!(parser.collected(titles), ["A", "B"]);
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lexer;
pub mod matcher;
pub mod path;
pub mod provider;
pub mod session;
pub mod stats;

pub use config::{BindingId, CaptureMode, JsonPathListener, SurfingConfigBuilder, SurfingConfiguration, SurfingOptions};
pub use engine::{ParsingContext, SurfingEngine};
pub use error::{CompileError, ConfigurationError, SurfError, SurfResult};
pub use path::{CompiledPath, PathBuilder, PathCompiler, compile};
pub use provider::{JsonProvider, SerdeJsonProvider};
pub use session::{NonBlockingParser, ResumableParser, SessionState};
pub use stats::SurfingStats;
