//! Input buffering for the incremental lexer
//!
//! Bytes fed by a session accumulate here until the lexer consumes them.
//! Consumed bytes are released from the front of the [`BytesMut`] so the
//! allocation gets reused once the lexer catches up with the input.

use bytes::{Buf, BytesMut};

/// Default initial capacity
pub const DEFAULT_CAPACITY: usize = 8192;

/// Append-only byte buffer with absolute offset tracking
#[derive(Debug)]
pub struct InputBuffer {
    buffer: BytesMut,
    /// Bytes released from the front since creation
    consumed: u64,
    /// Bytes ever appended
    total_appended: u64,
}

impl InputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            consumed: 0,
            total_appended: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Append an input chunk
    #[inline]
    pub fn append(&mut self, chunk: &[u8]) {
        self.total_appended += chunk.len() as u64;
        self.buffer.extend_from_slice(chunk);
    }

    /// Unconsumed bytes
    #[inline]
    #[must_use]
    pub fn chunk(&self) -> &[u8] {
        &self.buffer[..]
    }

    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buffer.first().copied()
    }

    /// Release `count` bytes from the front
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.buffer.advance(count);
        self.consumed += count as u64;
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Absolute document offset of the next unconsumed byte
    #[inline]
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.consumed
    }

    #[inline]
    #[must_use]
    pub fn total_appended(&self) -> u64 {
        self.total_appended
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
