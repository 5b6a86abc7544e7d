//! Tunable session options with validation

use crate::error::ConfigurationError;

/// Result type for option validation
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Upper bound accepted for `read_buffer_size`
const MAX_READ_BUFFER: usize = 64 * 1024 * 1024;

/// Options shared by every session kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfingOptions {
    /// Bytes requested from a reader per read call
    pub read_buffer_size: usize,
    /// Maximum container nesting; `None` for unlimited
    pub max_depth: Option<usize>,
    /// Ignore matches nested inside a value that is already being captured
    pub skip_overlapped_path: bool,
}

impl Default for SurfingOptions {
    fn default() -> Self {
        Self {
            read_buffer_size: 8192,
            max_depth: None,
            skip_overlapped_path: false,
        }
    }
}

impl SurfingOptions {
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Reject documents nested deeper than `depth` containers
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// When enabled, a node nested inside another matched node is not
    /// reported even if it matches a path on its own
    pub fn with_skip_overlapped_path(mut self, enabled: bool) -> Self {
        self.skip_overlapped_path = enabled;
        self
    }

    /// Validate option ranges
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidBufferSize`] for a zero or
    /// oversized read buffer and [`ConfigurationError::InvalidDepth`] for a
    /// zero depth limit.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.read_buffer_size == 0 {
            return Err(ConfigurationError::InvalidBufferSize(
                "read_buffer_size must be greater than 0".to_string(),
            ));
        }
        if self.read_buffer_size > MAX_READ_BUFFER {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "read_buffer_size must not exceed {MAX_READ_BUFFER} bytes"
            )));
        }
        if self.max_depth == Some(0) {
            return Err(ConfigurationError::InvalidDepth(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
