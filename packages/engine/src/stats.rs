//! Session processing statistics

use std::time::{Duration, Instant};

/// Counters kept by every session
#[derive(Debug, Clone)]
pub struct SurfingStats {
    /// Structural events consumed
    pub events: u64,
    /// Values delivered to bindings (listeners and collections)
    pub matches_delivered: u64,
    /// Bytes handed to the lexer
    pub bytes_processed: u64,
    /// Deepest container nesting seen
    pub max_depth: usize,
    /// Session creation time
    pub start_time: Instant,
}

impl SurfingStats {
    pub fn new() -> Self {
        Self {
            events: 0,
            matches_delivered: 0,
            bytes_processed: 0,
            max_depth: 0,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn record_event(&mut self) {
        self.events += 1;
    }

    #[inline]
    pub fn record_match(&mut self) {
        self.matches_delivered += 1;
    }

    #[inline]
    pub fn record_bytes(&mut self, bytes: u64) {
        self.bytes_processed += bytes;
    }

    #[inline]
    pub fn record_depth(&mut self, depth: usize) {
        self.max_depth = self.max_depth.max(depth);
    }

    pub fn duration(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for SurfingStats {
    fn default() -> Self {
        Self::new()
    }
}
