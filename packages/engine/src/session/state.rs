//! Session lifecycle states

use std::fmt;

/// Lifecycle of a parsing session
///
/// `NotStarted → Running → (Paused ⇄ Running) → Finished`. A stop request,
/// the end of the document and any fatal error all lead to `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    Paused,
    Finished,
}

impl SessionState {
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::NotStarted => "not started",
            SessionState::Running => "running",
            SessionState::Paused => "paused",
            SessionState::Finished => "finished",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
