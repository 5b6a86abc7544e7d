//! Parsing sessions
//!
//! A session couples a [`JsonLexer`] with a [`SurfingEngine`]. The
//! [`ResumableParser`] pulls its input from a reader and can be paused and
//! resumed from listeners; the [`NonBlockingParser`] is pushed chunks by the
//! caller and never blocks.

mod non_blocking;
mod resumable;
mod state;

pub use non_blocking::NonBlockingParser;
pub use resumable::ResumableParser;
pub use state::SessionState;

use crate::engine::{Flow, SurfingEngine};
use crate::error::SurfResult;
use crate::lexer::JsonLexer;
use crate::provider::JsonProvider;

/// Why the drive loop returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Drive {
    Paused,
    Stopped,
    /// Buffered input is exhausted
    NeedInput,
    /// The document is complete and input has ended
    Finished,
}

/// Alternate dispatch and lexing until something needs the caller
///
/// Pending matches are always dispatched before the next token is read, so
/// a pause leaves the lexer positioned right after the matched value.
pub(crate) fn drive<P: JsonProvider>(
    engine: &mut SurfingEngine<P>,
    lexer: &mut JsonLexer,
) -> SurfResult<Drive> {
    loop {
        match engine.dispatch()? {
            Flow::Continue => {}
            Flow::Paused => return Ok(Drive::Paused),
            Flow::Stopped => return Ok(Drive::Stopped),
        }

        match lexer.next_event()? {
            Some(event) => engine.handle_event(event, lexer.event_offset())?,
            None if lexer.is_finished() => {
                engine.finish(lexer.offset())?;
                return Ok(Drive::Finished);
            }
            None => return Ok(Drive::NeedInput),
        }
    }
}
