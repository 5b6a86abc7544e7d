//! Reader-backed session that can be paused and resumed

use std::io::{ErrorKind, Read};

use super::state::SessionState;
use super::{Drive, drive};
use crate::config::{BindingId, SurfingConfiguration};
use crate::engine::SurfingEngine;
use crate::error::{SurfError, SurfResult};
use crate::lexer::JsonLexer;
use crate::provider::{JsonProvider, SerdeJsonProvider};
use crate::stats::SurfingStats;

/// Session pulling input from a [`Read`] source
///
/// [`parse`](Self::parse) runs until the document ends, a listener stops the
/// session, or a listener pauses it. A paused session continues with
/// [`resume`](Self::resume) exactly where it left off: no event is lost or
/// delivered twice.
pub struct ResumableParser<R, P: JsonProvider = SerdeJsonProvider> {
    reader: R,
    lexer: JsonLexer,
    engine: SurfingEngine<P>,
    state: SessionState,
    read_buffer: Vec<u8>,
    stopped: bool,
    terminated: bool,
}

impl<R: Read, P: JsonProvider> ResumableParser<R, P> {
    pub fn new(reader: R, config: SurfingConfiguration<P>) -> Self {
        let read_size = config.options().read_buffer_size;
        Self {
            reader,
            lexer: JsonLexer::with_capacity(read_size),
            engine: SurfingEngine::new(config),
            state: SessionState::NotStarted,
            read_buffer: vec![0; read_size],
            stopped: false,
            terminated: false,
        }
    }

    /// Start parsing
    ///
    /// Returns once the document is complete, a listener stopped the
    /// session, or a listener paused it (see [`is_paused`](Self::is_paused)).
    ///
    /// # Errors
    ///
    /// Fails with [`SurfError::InvalidState`] unless the session is new, with
    /// [`SurfError::Terminated`] after a fatal error, and with the fatal
    /// protocol, listener or I/O error that ends the session.
    pub fn parse(&mut self) -> SurfResult<()> {
        match self.state {
            SessionState::NotStarted => {}
            SessionState::Finished if self.terminated => return Err(SurfError::Terminated),
            state => return Err(SurfError::invalid_state("parse", state.as_str())),
        }

        tracing::debug!(target: "jsurf::session", "resumable session started");
        self.state = SessionState::Running;
        self.run()
    }

    /// Continue a paused session
    ///
    /// Returns `Ok(false)` without doing anything unless the session is
    /// paused. Otherwise runs until the next pause or the end and reports
    /// whether another pause was hit.
    ///
    /// # Errors
    ///
    /// Returns the fatal error that ends the session, if any.
    pub fn resume(&mut self) -> SurfResult<bool> {
        if self.state != SessionState::Paused {
            return Ok(false);
        }
        tracing::debug!(target: "jsurf::session", "resumable session resumed");
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

    /// Whether the session ended because of a stop request
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Finished
    }

    /// Values gathered so far by a collect-all or collect-one binding
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
        loop {
            match drive(&mut self.engine, &mut self.lexer) {
                Ok(Drive::Paused) => {
                    self.state = SessionState::Paused;
                    tracing::debug!(target: "jsurf::session", offset = self.lexer.offset(), "session paused");
                    return Ok(());
                }
                Ok(Drive::Stopped) => {
                    self.stop();
                    tracing::debug!(target: "jsurf::session", offset = self.lexer.offset(), "session stopped");
                    return Ok(());
                }
                Ok(Drive::Finished) => {
                    self.state = SessionState::Finished;
                    return Ok(());
                }
                Ok(Drive::NeedInput) => {
                    if let Err(error) = self.fill() {
                        return Err(self.fail(error));
                    }
                }
                Err(error) => return Err(self.fail(error)),
            }
        }
    }

    /// Read the next chunk, signalling end of input at EOF
    fn fill(&mut self) -> SurfResult<()> {
        let read = loop {
            match self.reader.read(&mut self.read_buffer) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        };

        if read == 0 {
            self.lexer.end_of_input();
        } else {
            self.lexer.feed(&self.read_buffer[..read]);
            self.engine.stats_mut().record_bytes(read as u64);
        }
        Ok(())
    }

    fn fail(&mut self, error: SurfError) -> SurfError {
        log::error!("parsing session terminated: {error}");
        self.state = SessionState::Finished;
        self.terminated = true;
        error
    }
}
