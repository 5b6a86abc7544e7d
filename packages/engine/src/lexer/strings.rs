//! Incremental string token scanning
//!
//! Raw bytes are accumulated until the closing quote and validated as UTF-8
//! once, so multi-byte sequences split across chunks need no special care.
//! Escape progress is tracked explicitly, including a pending high surrogate
//! waiting for its `\uXXXX` partner.

use memchr::memchr2;

use crate::buffer::InputBuffer;
use crate::error::{SurfResult, protocol_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    /// Just read `\`
    Backslash,
    /// Reading the hex digits of `\u`
    Unicode { value: u16, digits: u8 },
    /// Have a high surrogate, need `\` of its partner
    LowBackslash,
    /// Have a high surrogate and `\`, need `u`
    LowU,
}

/// Progress through one string token; the opening quote is already consumed
#[derive(Debug)]
pub(super) struct StringScan {
    bytes: Vec<u8>,
    escape: Escape,
    high_surrogate: Option<u16>,
}

impl StringScan {
    pub(super) fn new() -> Self {
        Self {
            bytes: Vec::new(),
            escape: Escape::None,
            high_surrogate: None,
        }
    }

    /// Consume as much of the string as is buffered
    ///
    /// Returns the decoded text once the closing quote has been read.
    pub(super) fn scan(&mut self, buffer: &mut InputBuffer, start: u64) -> SurfResult<Option<String>> {
        loop {
            match self.escape {
                Escape::None => {
                    let chunk = buffer.chunk();
                    if chunk.is_empty() {
                        return Ok(None);
                    }
                    let run = memchr2(b'"', b'\\', chunk).unwrap_or(chunk.len());
                    if let Some(pos) = chunk[..run].iter().position(|b| *b < 0x20) {
                        return Err(protocol_error(
                            "unescaped control character in string",
                            buffer.offset() + pos as u64,
                        ));
                    }
                    self.bytes.extend_from_slice(&chunk[..run]);
                    let terminator = chunk.get(run).copied();
                    match terminator {
                        Some(b'"') => {
                            buffer.advance(run + 1);
                            return self.finish(start).map(Some);
                        }
                        Some(_) => {
                            buffer.advance(run + 1);
                            self.escape = Escape::Backslash;
                        }
                        None => {
                            buffer.advance(run);
                            return Ok(None);
                        }
                    }
                }
                Escape::Backslash => {
                    let Some(byte) = next_byte(buffer) else {
                        return Ok(None);
                    };
                    let decoded = match byte {
                        b'"' => b'"',
                        b'\\' => b'\\',
                        b'/' => b'/',
                        b'b' => 0x08,
                        b'f' => 0x0C,
                        b'n' => b'\n',
                        b'r' => b'\r',
                        b't' => b'\t',
                        b'u' => {
                            self.escape = Escape::Unicode { value: 0, digits: 0 };
                            continue;
                        }
                        _ => {
                            return Err(protocol_error(
                                "invalid escape sequence",
                                buffer.offset() - 1,
                            ));
                        }
                    };
                    self.bytes.push(decoded);
                    self.escape = Escape::None;
                }
                Escape::Unicode { value, digits } => {
                    let Some(byte) = next_byte(buffer) else {
                        return Ok(None);
                    };
                    let digit = (byte as char).to_digit(16).ok_or_else(|| {
                        protocol_error("invalid hex digit in \\u escape", buffer.offset() - 1)
                    })?;
                    let value = (value << 4) | digit as u16;
                    if digits < 3 {
                        self.escape = Escape::Unicode {
                            value,
                            digits: digits + 1,
                        };
                    } else {
                        self.code_unit(value, buffer.offset())?;
                    }
                }
                Escape::LowBackslash => {
                    let Some(byte) = next_byte(buffer) else {
                        return Ok(None);
                    };
                    if byte != b'\\' {
                        return Err(protocol_error("unpaired high surrogate", buffer.offset() - 1));
                    }
                    self.escape = Escape::LowU;
                }
                Escape::LowU => {
                    let Some(byte) = next_byte(buffer) else {
                        return Ok(None);
                    };
                    if byte != b'u' {
                        return Err(protocol_error("unpaired high surrogate", buffer.offset() - 1));
                    }
                    self.escape = Escape::Unicode { value: 0, digits: 0 };
                }
            }
        }
    }

    /// Handle a complete `\uXXXX` code unit
    fn code_unit(&mut self, unit: u16, offset: u64) -> SurfResult<()> {
        let code = match (self.high_surrogate.take(), unit) {
            (None, 0xD800..=0xDBFF) => {
                self.high_surrogate = Some(unit);
                self.escape = Escape::LowBackslash;
                return Ok(());
            }
            (None, 0xDC00..=0xDFFF) => {
                return Err(protocol_error("unpaired low surrogate", offset));
            }
            (None, unit) => u32::from(unit),
            (Some(high), 0xDC00..=0xDFFF) => {
                0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00)
            }
            (Some(_), _) => return Err(protocol_error("invalid low surrogate", offset)),
        };

        let c = char::from_u32(code).ok_or_else(|| protocol_error("invalid unicode escape", offset))?;
        let mut utf8 = [0u8; 4];
        self.bytes.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
        self.escape = Escape::None;
        Ok(())
    }

    fn finish(&mut self, start: u64) -> SurfResult<String> {
        let bytes = std::mem::take(&mut self.bytes);
        match simdutf8::compat::from_utf8(&bytes) {
            Ok(text) => Ok(text.to_owned()),
            Err(e) => Err(protocol_error(
                "invalid UTF-8 in string",
                start + 1 + e.valid_up_to() as u64,
            )),
        }
    }
}

#[inline]
fn next_byte(buffer: &mut InputBuffer) -> Option<u8> {
    let byte = buffer.peek()?;
    buffer.advance(1);
    Some(byte)
}
