//! jsurf public API
//!
//! One-call helpers over the streaming JsonPath engine: collect matches,
//! iterate them lazily, or create resumable and non-blocking sessions with
//! listeners attached.
//!
//! ```
//! use jsurf::JsonSurfer;
//!
//! let json = r#"{"store": {"book": [{"author": "Nigel Rees"}, {"author": "Evelyn Waugh"}]}}"#;
//! let surfer = JsonSurfer::new();
//! let author = surfer.collect_one(json.as_bytes(), "$..book[1].author").unwrap();
//! assert_eq!(author, "Evelyn Waugh");
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod surfer;

pub use surfer::{JsonSurfer, SurfingIterator};

pub use jsurf_engine::{
    BindingId, CaptureMode, CompileError, CompiledPath, ConfigurationError, JsonPathListener,
    JsonProvider, NonBlockingParser, ParsingContext, PathBuilder, ResumableParser, SerdeJsonProvider,
    SessionState, SurfError, SurfResult, SurfingConfigBuilder, SurfingConfiguration, SurfingOptions,
    SurfingStats, compile,
};
