//! Lexer state machine and grammar tracking

use super::event::{JsonEvent, ScalarValue};
use super::literals::LiteralScan;
use super::numbers::NumberScan;
use super::strings::StringScan;
use crate::buffer::InputBuffer;
use crate::error::{SurfResult, protocol_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the grammar allows next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// A value is required (document start, after `:`, after `,` in an array)
    Value,
    /// Right after `[`
    ValueOrEnd,
    /// Right after `{`
    KeyOrEnd,
    /// After `,` in an object
    Key,
    Colon,
    CommaOrEnd,
    /// The root value is complete; only whitespace may follow
    Trailing,
}

/// Token being read when the buffer ran dry
#[derive(Debug)]
enum Partial {
    None,
    String { scan: StringScan, key: bool },
    Number(NumberScan),
    Literal(LiteralScan),
}

/// Resumable JSON tokenizer
#[derive(Debug)]
pub struct JsonLexer {
    buffer: InputBuffer,
    stack: Vec<Container>,
    expect: Expect,
    partial: Partial,
    /// Offset where the partial token started
    token_start: u64,
    /// Offset where the most recently returned event started
    event_start: u64,
    end_of_input: bool,
}

impl JsonLexer {
    pub fn new() -> Self {
        Self::with_capacity(crate::buffer::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: InputBuffer::with_capacity(capacity),
            stack: Vec::new(),
            expect: Expect::Value,
            partial: Partial::None,
            token_start: 0,
            event_start: 0,
            end_of_input: false,
        }
    }

    /// Append more input
    #[inline]
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.append(chunk);
    }

    /// Declare that no more input will arrive
    #[inline]
    pub fn end_of_input(&mut self) {
        self.end_of_input = true;
    }

    #[inline]
    #[must_use]
    pub fn is_end_of_input(&self) -> bool {
        self.end_of_input
    }

    /// Whether a complete document has been read and input has ended
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_of_input && self.expect == Expect::Trailing && self.buffer.is_empty()
    }

    /// Absolute offset of the next unread byte
    #[inline]
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.buffer.offset()
    }

    #[inline]
    #[must_use]
    pub fn bytes_received(&self) -> u64 {
        self.buffer.total_appended()
    }

    /// Offset of the first byte of the last event returned
    #[inline]
    #[must_use]
    pub fn event_offset(&self) -> u64 {
        self.event_start
    }

    /// Current container nesting
    #[inline]
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Produce the next event
    ///
    /// `Ok(None)` means the buffered input is exhausted: either more input is
    /// needed, or the document is complete (see [`is_finished`](Self::is_finished)).
    ///
    /// # Errors
    ///
    /// Returns [`SurfError::Protocol`](crate::error::SurfError::Protocol) for
    /// malformed input, truncated input after end of input, empty input and
    /// trailing non-whitespace content.
    pub fn next_event(&mut self) -> SurfResult<Option<JsonEvent>> {
        if let Some(event) = self.resume_partial()? {
            return Ok(Some(event));
        }
        if !matches!(self.partial, Partial::None) {
            return self.need_more();
        }

        loop {
            let Some(byte) = self.buffer.peek() else {
                return self.at_end();
            };
            if matches!(byte, b' ' | b'\t' | b'\n' | b'\r') {
                self.buffer.advance(1);
                continue;
            }

            let offset = self.buffer.offset();
            self.event_start = offset;
            return match self.expect {
                Expect::Value => self.start_value(byte),
                Expect::ValueOrEnd if byte == b']' => {
                    self.buffer.advance(1);
                    self.close(Container::Array)
                }
                Expect::ValueOrEnd => self.start_value(byte),
                Expect::KeyOrEnd if byte == b'}' => {
                    self.buffer.advance(1);
                    self.close(Container::Object)
                }
                Expect::KeyOrEnd | Expect::Key if byte == b'"' => {
                    self.buffer.advance(1);
                    let partial = Partial::String {
                        scan: StringScan::new(),
                        key: true,
                    };
                    self.begin_partial(partial, offset)
                }
                Expect::KeyOrEnd | Expect::Key => Err(protocol_error(
                    format!("expected object key, found {}", describe(byte)),
                    offset,
                )),
                Expect::Colon if byte == b':' => {
                    self.buffer.advance(1);
                    self.expect = Expect::Value;
                    continue;
                }
                Expect::Colon => Err(protocol_error(
                    format!("expected ':', found {}", describe(byte)),
                    offset,
                )),
                Expect::CommaOrEnd => match (byte, self.stack.last()) {
                    (b',', Some(Container::Object)) => {
                        self.buffer.advance(1);
                        self.expect = Expect::Key;
                        continue;
                    }
                    (b',', Some(Container::Array)) => {
                        self.buffer.advance(1);
                        self.expect = Expect::Value;
                        continue;
                    }
                    (b'}', Some(Container::Object)) => {
                        self.buffer.advance(1);
                        self.close(Container::Object)
                    }
                    (b']', Some(Container::Array)) => {
                        self.buffer.advance(1);
                        self.close(Container::Array)
                    }
                    _ => Err(protocol_error(
                        format!("expected ',' or closing bracket, found {}", describe(byte)),
                        offset,
                    )),
                },
                Expect::Trailing => Err(protocol_error(
                    format!("unexpected {} after end of document", describe(byte)),
                    offset,
                )),
            };
        }
    }

    fn start_value(&mut self, byte: u8) -> SurfResult<Option<JsonEvent>> {
        let offset = self.buffer.offset();
        match byte {
            b'{' => {
                self.buffer.advance(1);
                self.stack.push(Container::Object);
                self.expect = Expect::KeyOrEnd;
                Ok(Some(JsonEvent::StartObject))
            }
            b'[' => {
                self.buffer.advance(1);
                self.stack.push(Container::Array);
                self.expect = Expect::ValueOrEnd;
                Ok(Some(JsonEvent::StartArray))
            }
            b'"' => {
                self.buffer.advance(1);
                self.begin_partial(
                    Partial::String {
                        scan: StringScan::new(),
                        key: false,
                    },
                    offset,
                )
            }
            b'-' | b'0'..=b'9' => self.begin_partial(Partial::Number(NumberScan::new()), offset),
            b't' | b'f' | b'n' => {
                self.begin_partial(Partial::Literal(LiteralScan::new(byte)), offset)
            }
            _ => Err(protocol_error(format!("unexpected {}", describe(byte)), offset)),
        }
    }

    fn begin_partial(&mut self, partial: Partial, offset: u64) -> SurfResult<Option<JsonEvent>> {
        self.partial = partial;
        self.token_start = offset;
        match self.resume_partial()? {
            Some(event) => Ok(Some(event)),
            None => self.need_more(),
        }
    }

    /// Continue the token in progress; `None` while it is still incomplete
    fn resume_partial(&mut self) -> SurfResult<Option<JsonEvent>> {
        let start = self.token_start;
        let completed = match &mut self.partial {
            Partial::None => None,
            Partial::String { scan, key } => {
                let key = *key;
                scan.scan(&mut self.buffer, start)?.map(|text| {
                    if key {
                        JsonEvent::FieldName(text)
                    } else {
                        JsonEvent::Scalar(ScalarValue::String(text))
                    }
                })
            }
            Partial::Number(scan) => scan
                .scan(&mut self.buffer, self.end_of_input, start)?
                .map(JsonEvent::Scalar),
            Partial::Literal(scan) => scan.scan(&mut self.buffer, start)?.map(JsonEvent::Scalar),
        };

        let Some(event) = completed else {
            return Ok(None);
        };
        self.partial = Partial::None;
        self.event_start = start;
        if matches!(event, JsonEvent::FieldName(_)) {
            self.expect = Expect::Colon;
        } else {
            self.value_complete();
        }
        Ok(Some(event))
    }

    fn close(&mut self, container: Container) -> SurfResult<Option<JsonEvent>> {
        self.stack.pop();
        self.value_complete();
        Ok(Some(match container {
            Container::Object => JsonEvent::EndObject,
            Container::Array => JsonEvent::EndArray,
        }))
    }

    #[inline]
    fn value_complete(&mut self) {
        self.expect = if self.stack.is_empty() {
            Expect::Trailing
        } else {
            Expect::CommaOrEnd
        };
    }

    fn need_more(&self) -> SurfResult<Option<JsonEvent>> {
        if self.end_of_input {
            Err(protocol_error("unexpected end of input inside token", self.buffer.offset()))
        } else {
            Ok(None)
        }
    }

    fn at_end(&self) -> SurfResult<Option<JsonEvent>> {
        if !self.end_of_input || self.expect == Expect::Trailing {
            return Ok(None);
        }
        let message = if self.stack.is_empty() && self.expect == Expect::Value {
            "empty document"
        } else {
            "unexpected end of input"
        };
        Err(protocol_error(message, self.buffer.offset()))
    }
}

impl Default for JsonLexer {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(byte: u8) -> String {
    if byte.is_ascii_graphic() {
        format!("'{}'", byte as char)
    } else {
        format!("byte 0x{byte:02x}")
    }
}
