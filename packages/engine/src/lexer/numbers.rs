//! Incremental number token scanning

use super::event::ScalarValue;
use crate::buffer::InputBuffer;
use crate::error::{SurfResult, protocol_error};

/// Position within the JSON number grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Start,
    Minus,
    Zero,
    Integer,
    Dot,
    Fraction,
    Exponent,
    ExponentSign,
    ExponentDigits,
}

impl NumberState {
    #[inline]
    fn is_accepting(self) -> bool {
        matches!(
            self,
            NumberState::Zero
                | NumberState::Integer
                | NumberState::Fraction
                | NumberState::ExponentDigits
        )
    }
}

/// Progress through one number token
///
/// A number has no terminator of its own: it ends at the first delimiter,
/// or at end of input.
#[derive(Debug)]
pub(super) struct NumberScan {
    text: String,
    state: NumberState,
    is_float: bool,
}

impl NumberScan {
    pub(super) fn new() -> Self {
        Self {
            text: String::new(),
            state: NumberState::Start,
            is_float: false,
        }
    }

    pub(super) fn scan(
        &mut self,
        buffer: &mut InputBuffer,
        end_of_input: bool,
        start: u64,
    ) -> SurfResult<Option<ScalarValue>> {
        while let Some(byte) = buffer.peek() {
            let next = match (self.state, byte) {
                (NumberState::Start, b'-') => NumberState::Minus,
                (NumberState::Start | NumberState::Minus, b'0') => NumberState::Zero,
                (NumberState::Start | NumberState::Minus, b'1'..=b'9') => NumberState::Integer,
                (NumberState::Integer, b'0'..=b'9') => NumberState::Integer,
                (NumberState::Zero | NumberState::Integer, b'.') => NumberState::Dot,
                (NumberState::Dot | NumberState::Fraction, b'0'..=b'9') => NumberState::Fraction,
                (NumberState::Zero | NumberState::Integer | NumberState::Fraction, b'e' | b'E') => {
                    NumberState::Exponent
                }
                (NumberState::Exponent, b'+' | b'-') => NumberState::ExponentSign,
                (
                    NumberState::Exponent | NumberState::ExponentSign | NumberState::ExponentDigits,
                    b'0'..=b'9',
                ) => NumberState::ExponentDigits,
                (state, b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}') if state.is_accepting() => {
                    return self.finish(start).map(Some);
                }
                _ => {
                    return Err(protocol_error(
                        format!("invalid number near '{}{}'", self.text, byte as char),
                        buffer.offset(),
                    ));
                }
            };
            if matches!(next, NumberState::Dot | NumberState::Exponent) {
                self.is_float = true;
            }
            self.state = next;
            self.text.push(byte as char);
            buffer.advance(1);
        }

        if end_of_input {
            if self.state.is_accepting() {
                return self.finish(start).map(Some);
            }
            return Err(protocol_error("truncated number", buffer.offset()));
        }
        Ok(None)
    }

    fn finish(&mut self, start: u64) -> SurfResult<ScalarValue> {
        let text = std::mem::take(&mut self.text);
        if !self.is_float {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(ScalarValue::Int(i));
            }
            if let Ok(u) = text.parse::<u64>() {
                return Ok(ScalarValue::UInt(u));
            }
        }
        text.parse::<f64>()
            .map(ScalarValue::Float)
            .map_err(|_| protocol_error(format!("invalid number '{text}'"), start))
    }
}
