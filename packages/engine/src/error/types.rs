//! Core error types for the streaming path engine

/// Result type for engine operations
pub type SurfResult<T> = Result<T, SurfError>;

/// A path expression failed to compile
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid path expression '{expression}' at offset {offset}: {reason}")]
pub struct CompileError {
    /// The expression as supplied by the caller
    pub expression: String,
    /// Byte offset into `expression` where the problem was detected
    pub offset: usize,
    /// Human readable description
    pub reason: String,
}

/// Invalid session options
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),

    #[error("Invalid depth limit: {0}")]
    InvalidDepth(String),
}

/// Errors surfaced by compilation, parsing sessions and the façade
#[derive(Debug, thiserror::Error)]
pub enum SurfError {
    /// Bad expression syntax
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Malformed or truncated input, or an inconsistent event sequence
    #[error("protocol error at offset {offset}: {message}")]
    Protocol { offset: u64, message: String },

    /// A listener callback failed; the session has been terminated
    #[error("listener bound to '{path}' failed")]
    Listener {
        path: String,
        #[source]
        source: anyhow::Error,
    },

    /// A collect-one request found nothing
    #[error("no value matched '{path}'")]
    BindingNotSatisfied { path: String },

    /// A matched value does not deserialize into the requested type
    #[error("cannot deserialize value matched by '{path}'")]
    Deserialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The session already reached a terminal state
    #[error("session has been terminated")]
    Terminated,

    /// The operation is not valid in the current session state
    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Invalid session options
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    /// Reading from the session source failed
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl SurfError {
    /// Whether this error ends the session that produced it
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SurfError::Protocol { .. }
                | SurfError::Listener { .. }
                | SurfError::Io(_)
                | SurfError::Terminated
        )
    }
}
