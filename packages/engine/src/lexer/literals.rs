//! `true`, `false` and `null`

use super::event::ScalarValue;
use crate::buffer::InputBuffer;
use crate::error::{SurfResult, protocol_error};

#[derive(Debug)]
pub(super) struct LiteralScan {
    text: &'static [u8],
    matched: usize,
}

impl LiteralScan {
    /// `first` must be one of `t`, `f`, `n`
    pub(super) fn new(first: u8) -> Self {
        let text: &'static [u8] = match first {
            b't' => b"true",
            b'f' => b"false",
            _ => b"null",
        };
        Self { text, matched: 0 }
    }

    pub(super) fn scan(&mut self, buffer: &mut InputBuffer, start: u64) -> SurfResult<Option<ScalarValue>> {
        while self.matched < self.text.len() {
            let Some(byte) = buffer.peek() else {
                return Ok(None);
            };
            if byte != self.text[self.matched] {
                return Err(protocol_error(
                    format!("invalid literal, expected '{}'", String::from_utf8_lossy(self.text)),
                    start,
                ));
            }
            buffer.advance(1);
            self.matched += 1;
        }

        Ok(Some(match self.text {
            b"true" => ScalarValue::Bool(true),
            b"false" => ScalarValue::Bool(false),
            _ => ScalarValue::Null,
        }))
    }
}
