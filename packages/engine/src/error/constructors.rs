//! Error constructor helpers
//!
//! Factory functions mirroring the variants of [`SurfError`] so call sites
//! stay short.

use super::types::{CompileError, SurfError};

/// Creates a compile error for `expression` at byte `offset`
pub fn compile_error(
    expression: impl Into<String>,
    reason: impl Into<String>,
    offset: usize,
) -> CompileError {
    CompileError {
        expression: expression.into(),
        offset,
        reason: reason.into(),
    }
}

/// Creates a protocol error detected at absolute document `offset`
pub fn protocol_error(message: impl Into<String>, offset: u64) -> SurfError {
    SurfError::Protocol {
        offset,
        message: message.into(),
    }
}

impl SurfError {
    /// Wraps a listener failure together with the binding's expression
    pub fn listener(path: impl Into<String>, source: anyhow::Error) -> Self {
        SurfError::Listener {
            path: path.into(),
            source,
        }
    }

    /// Creates a not-found error for a collect-one request
    pub fn not_satisfied(path: impl Into<String>) -> Self {
        SurfError::BindingNotSatisfied { path: path.into() }
    }

    /// Wraps a typed conversion failure for values matched by `path`
    pub fn deserialize(path: impl Into<String>, source: serde_json::Error) -> Self {
        SurfError::Deserialize {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid-state error
    #[must_use]
    pub fn invalid_state(operation: &'static str, state: &'static str) -> Self {
        SurfError::InvalidState { operation, state }
    }
}
