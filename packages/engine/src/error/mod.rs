//! Error handling for path compilation, tokenizing and session control
//!
//! Every fallible operation in the crate reports a [`SurfError`]. Compile
//! errors are recoverable by fixing the expression; protocol, listener and
//! I/O errors terminate the session that raised them.

mod constructors;
mod types;

pub use constructors::{compile_error, protocol_error};
pub use types::{CompileError, ConfigurationError, SurfError, SurfResult};
