//! Lazy iteration over matches

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Read;
use std::rc::Rc;

use jsurf_engine::{JsonProvider, ResumableParser, SerdeJsonProvider, SessionState, SurfResult};

use super::core::JsonSurfer;

/// Iterator reading just enough of the document to produce the next match
///
/// Backed by a [`ResumableParser`] whose listener pauses after every match.
/// A fatal error is yielded once, after which the iterator is exhausted.
pub struct SurfingIterator<R, P: JsonProvider = SerdeJsonProvider> {
    parser: ResumableParser<R, P>,
    queue: Rc<RefCell<VecDeque<P::Value>>>,
    done: bool,
}

impl<R: Read, P: JsonProvider> SurfingIterator<R, P> {
    /// Session state of the underlying parser
    #[inline]
    pub fn state(&self) -> SessionState {
        self.parser.state()
    }

    fn advance(&mut self) -> SurfResult<()> {
        if self.parser.state() == SessionState::NotStarted {
            self.parser.parse()?;
        } else {
            self.parser.resume()?;
        }
        self.done = !self.parser.is_paused();
        Ok(())
    }
}

impl<R: Read, P: JsonProvider> Iterator for SurfingIterator<R, P> {
    type Item = SurfResult<P::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            if let Some(value) = next {
                return Some(Ok(value));
            }
            if self.done {
                return None;
            }
            if let Err(error) = self.advance() {
                self.done = true;
                return Some(Err(error));
            }
        }
    }
}

impl<P: JsonProvider + Clone> JsonSurfer<P> {
    /// Iterate over values matching `path` without reading ahead
    ///
    /// # Errors
    ///
    /// Fails if the expression does not compile.
    pub fn iterator<R: Read>(&self, json: R, path: &str) -> SurfResult<SurfingIterator<R, P>> {
        let queue: Rc<RefCell<VecDeque<P::Value>>> = Rc::new(RefCell::new(VecDeque::new()));
        let sink = Rc::clone(&queue);
        let mut builder = self.config_builder();
        builder.bind(path, move |value, context| {
            sink.borrow_mut().push_back(value.clone());
            context.pause();
            Ok(())
        })?;

        Ok(SurfingIterator {
            parser: ResumableParser::new(json, builder.build()?),
            queue,
            done: false,
        })
    }
}
