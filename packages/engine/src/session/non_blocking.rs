//! Push-fed session for input arriving in chunks

use super::state::SessionState;
use super::{Drive, drive};
use crate::config::{BindingId, SurfingConfiguration};
use crate::engine::SurfingEngine;
use crate::error::{SurfError, SurfResult};
use crate::lexer::JsonLexer;
use crate::provider::{JsonProvider, SerdeJsonProvider};
use crate::stats::SurfingStats;

/// Session fed by the caller, one chunk at a time
///
/// Chunks may split the document anywhere. Listeners fire as soon as the
/// bytes that complete a match have been fed. While paused, fed chunks are
/// only buffered until [`resume`](Self::resume).
pub struct NonBlockingParser<P: JsonProvider = SerdeJsonProvider> {
    lexer: JsonLexer,
    engine: SurfingEngine<P>,
    state: SessionState,
    input_closed: bool,
    stopped: bool,
}

impl<P: JsonProvider> NonBlockingParser<P> {
    pub fn new(config: SurfingConfiguration<P>) -> Self {
        let capacity = config.options().read_buffer_size;
        Self {
            lexer: JsonLexer::with_capacity(capacity),
            engine: SurfingEngine::new(config),
            state: SessionState::NotStarted,
            input_closed: false,
            stopped: false,
        }
    }

    /// Push the next chunk of the document
    ///
    /// Returns `Ok(false)` once the session no longer accepts input: after
    /// [`end_of_input`](Self::end_of_input), a stop request or a fatal error.
    /// An empty chunk is accepted and does nothing.
    ///
    /// # Errors
    ///
    /// Returns the protocol or listener error that terminates the session.
    pub fn feed(&mut self, chunk: &[u8]) -> SurfResult<bool> {
        if self.input_closed || self.state == SessionState::Finished {
            return Ok(false);
        }
        if chunk.is_empty() {
            return Ok(true);
        }

        self.lexer.feed(chunk);
        self.engine.stats_mut().record_bytes(chunk.len() as u64);
        if self.state == SessionState::Paused {
            return Ok(true);
        }

        self.state = SessionState::Running;
        self.run()?;
        Ok(self.state != SessionState::Finished)
    }

    /// Declare that the document is complete
    ///
    /// # Errors
    ///
    /// Returns a protocol error if the document is truncated, or the listener
    /// error raised while processing the final tokens.
    pub fn end_of_input(&mut self) -> SurfResult<()> {
        if self.input_closed || self.state == SessionState::Finished {
            return Ok(());
        }
        self.input_closed = true;
        self.lexer.end_of_input();
        if self.state == SessionState::Paused {
            return Ok(());
        }

        self.state = SessionState::Running;
        self.run()
    }

    /// Continue a paused session with the input buffered so far
    ///
    /// Returns `Ok(false)` without doing anything unless the session is paused,
    /// and otherwise whether the resumed run paused again.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that ends the session, if any.
    pub fn resume(&mut self) -> SurfResult<bool> {
        if self.state != SessionState::Paused {
            return Ok(false);
        }
        self.state = SessionState::Running;
        self.run()?;
        Ok(self.state == SessionState::Paused)
    }

    /// End the session from outside a listener
    pub fn stop(&mut self) {
        if self.state != SessionState::Finished {
            self.stopped = true;
            self.state = SessionState::Finished;
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == SessionState::Paused
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    pub fn collected(&self, binding: BindingId) -> &[P::Value] {
        self.engine.collected(binding.index())
    }

    pub fn take_collected(&mut self, binding: BindingId) -> Vec<P::Value> {
        self.engine.take_collected(binding.index())
    }

    #[inline]
    pub fn stats(&self) -> &SurfingStats {
        self.engine.stats()
    }

    fn run(&mut self) -> SurfResult<()> {
        match drive(&mut self.engine, &mut self.lexer) {
            Ok(Drive::Paused) => {
                self.state = SessionState::Paused;
                Ok(())
            }
            Ok(Drive::Stopped) => {
                self.stop();
                Ok(())
            }
            Ok(Drive::Finished) => {
                self.state = SessionState::Finished;
                tracing::debug!(
                    target: "jsurf::session",
                    bytes = self.lexer.bytes_received(),
                    "non-blocking session finished"
                );
                Ok(())
            }
            Ok(Drive::NeedInput) => Ok(()),
            Err(error) => Err(self.fail(error)),
        }
    }

    fn fail(&mut self, error: SurfError) -> SurfError {
        log::error!("non-blocking session terminated: {error}");
        self.state = SessionState::Finished;
        error
    }
}
