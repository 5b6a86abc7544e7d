//! Reader-backed sessions: pause, resume and stop

mod common;

use std::cell::RefCell;
use std::io::{self, Read};
use std::rc::Rc;

use common::BOOKSTORE;
use jsurf_engine::{ResumableParser, SerdeJsonProvider, SessionState, SurfError, SurfingConfigBuilder};

/// Hands out a few bytes per read, optionally interrupting every other call
struct TrickleReader<'a> {
    data: &'a [u8],
    step: usize,
    interrupt: bool,
    calls: usize,
}

impl<'a> TrickleReader<'a> {
    fn new(data: &'a [u8], step: usize, interrupt: bool) -> Self {
        Self {
            data,
            step,
            interrupt,
            calls: 0,
        }
    }
}

impl Read for TrickleReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.interrupt && self.calls % 2 == 0 {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "try again"));
        }
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

struct BrokenReader;

impl Read for BrokenReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("disk on fire"))
    }
}

fn titles_pausing(seen: &Rc<RefCell<Vec<String>>>) -> SurfingConfigBuilder<SerdeJsonProvider> {
    let sink = Rc::clone(seen);
    let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
    builder
        .bind("$.store.book[*]", move |book, ctx| {
            sink.borrow_mut().push(book["title"].as_str().unwrap_or_default().to_string());
            ctx.pause();
            Ok(())
        })
        .expect("expression compiles");
    builder
}

#[cfg(test)]
mod pause_tests {
    use super::*;

    #[test]
    fn test_resume_before_parse() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), titles_pausing(&seen).build().expect("valid"));
        assert_eq!(parser.state(), SessionState::NotStarted);
        assert!(!parser.resume().expect("no-op"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_pause_and_resume_each_book() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), titles_pausing(&seen).build().expect("valid"));

        parser.parse().expect("first chunk parses");
        assert!(parser.is_paused());
        assert_eq!(*seen.borrow(), vec!["Sayings of the Century"]);

        assert!(parser.resume().expect("resumes"));
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1], "Sword of Honour");
        assert!(parser.is_paused());

        assert!(parser.resume().expect("resumes"));
        assert!(parser.resume().expect("resumes"));
        assert_eq!(seen.borrow().len(), 4);
        assert!(parser.is_paused());

        assert!(!parser.resume().expect("runs to the end"));
        assert!(parser.is_finished());
        assert!(!parser.is_stopped());
        assert!(!parser.resume().expect("no-op once finished"));
        assert_eq!(seen.borrow().len(), 4);
    }

    #[test]
    fn test_resume_reports_whether_it_paused_again() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        for path in ["$.store.book[0]", "$.store.book[1]"] {
            builder
                .bind(path, |_book, ctx| {
                    ctx.pause();
                    Ok(())
                })
                .expect("expression compiles");
        }
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid"));

        assert!(!parser.resume().expect("nothing to resume yet"));
        parser.parse().expect("parses up to the first book");
        assert!(parser.is_paused());
        assert!(parser.resume().expect("pauses on the second book"));
        assert!(!parser.resume().expect("runs to the end"));
        assert!(parser.is_finished());
        assert!(!parser.resume().expect("no-op once finished"));
    }

    #[test]
    fn test_parse_is_single_use() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), titles_pausing(&seen).build().expect("valid"));
        parser.parse().expect("parses");
        assert!(matches!(
            parser.parse(),
            Err(SurfError::InvalidState { operation: "parse", .. })
        ));

        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder.collect_all("$..price").expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid"));
        parser.parse().expect("parses");
        assert!(matches!(parser.parse(), Err(SurfError::InvalidState { .. })));
    }

    #[test]
    fn test_pending_matches_survive_pause() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&seen);
        let second = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.expensive", move |_value, ctx| {
                first.borrow_mut().push("first");
                ctx.pause();
                Ok(())
            })
            .expect("expression compiles");
        builder
            .bind("$.expensive", move |_value, _ctx| {
                second.borrow_mut().push("second");
                Ok(())
            })
            .expect("expression compiles");

        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid"));
        parser.parse().expect("parses");
        assert_eq!(*seen.borrow(), vec!["first"]);
        assert!(!parser.resume().expect("runs to the end"));
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
        assert!(parser.is_finished());
    }

    #[test]
    fn test_pause_with_trickling_reader() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut builder = titles_pausing(&seen);
        builder.read_buffer_size(3);
        let reader = TrickleReader::new(BOOKSTORE.as_bytes(), 5, true);
        let mut parser = ResumableParser::new(reader, builder.build().expect("valid"));

        parser.parse().expect("parses");
        while parser.resume().expect("resumes") {}
        assert!(parser.is_finished());
        assert_eq!(seen.borrow().len(), 4);
        assert_eq!(seen.borrow()[3], "The Lord of the Rings");
    }
}

#[cfg(test)]
mod stop_tests {
    use super::*;

    #[test]
    fn test_stop_from_listener() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$..author", move |value, ctx| {
                sink.borrow_mut().push(value.clone());
                if sink.borrow().len() == 2 {
                    ctx.stop();
                }
                Ok(())
            })
            .expect("expression compiles");

        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid"));
        parser.parse().expect("parses");
        assert_eq!(seen.borrow().len(), 2);
        assert!(parser.is_stopped());
        assert!(parser.is_finished());
        assert!(!parser.resume().expect("no-op once stopped"));
    }

    #[test]
    fn test_stop_wins_over_pause() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        builder
            .bind("$.store", |_value, ctx| {
                ctx.pause();
                ctx.stop();
                assert!(ctx.is_paused() && ctx.is_stopped());
                Ok(())
            })
            .expect("expression compiles");
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), builder.build().expect("valid"));
        parser.parse().expect("parses");
        assert!(parser.is_stopped());
        assert!(!parser.is_paused());
    }

    #[test]
    fn test_external_stop_while_paused() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut parser = ResumableParser::new(BOOKSTORE.as_bytes(), titles_pausing(&seen).build().expect("valid"));
        parser.parse().expect("parses");
        parser.stop();
        assert_eq!(parser.state(), SessionState::Finished);
        assert!(parser.is_stopped());
        assert!(!parser.resume().expect("no-op once stopped"));
        assert_eq!(seen.borrow().len(), 1);
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn test_truncated_document() {
        let mut builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let prices = builder.collect_all("$..price").expect("expression compiles");
        let truncated = &BOOKSTORE.as_bytes()[..BOOKSTORE.len() / 2];
        let mut parser = ResumableParser::new(truncated, builder.build().expect("valid"));

        assert!(matches!(parser.parse(), Err(SurfError::Protocol { .. })));
        assert!(!parser.collected(prices).is_empty());
        assert!(matches!(parser.parse(), Err(SurfError::Terminated)));
    }

    #[test]
    fn test_read_failure() {
        let builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let mut parser = ResumableParser::new(BrokenReader, builder.build().expect("valid"));
        assert!(matches!(parser.parse(), Err(SurfError::Io(_))));
        assert!(parser.is_finished());
    }

    #[test]
    fn test_empty_document() {
        let builder = SurfingConfigBuilder::new(SerdeJsonProvider);
        let mut parser = ResumableParser::new(&b"  \n"[..], builder.build().expect("valid"));
        match parser.parse() {
            Err(SurfError::Protocol { offset, message }) => {
                assert_eq!(offset, 3);
                assert_eq!(message, "empty document");
            }
            other => panic!("expected protocol error, got {other:?}"),
        }
    }
}
