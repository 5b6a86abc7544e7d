//! Per-callback parsing context

use crate::path::CompiledPath;

/// Key/value store shared by all listeners of a session
pub type TransientStore = hashbrown::HashMap<String, serde_json::Value>;

/// Where a matched node sits in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLocation {
    /// Normalized path such as `$['store']['book'][1]`
    pub path: String,
    /// Member name when the node's parent is an object
    pub field: Option<String>,
    /// Element index when the node's parent is an array
    pub index: Option<usize>,
}

impl MatchLocation {
    pub(crate) fn root() -> Self {
        Self {
            path: "$".to_string(),
            field: None,
            index: None,
        }
    }
}

/// Requests raised by a listener during one callback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Signal {
    pub pause: bool,
    pub stop: bool,
    pub skip_children: bool,
}

/// Handed to listeners together with each matched value
///
/// Control requests take effect once the callback returns: `stop` wins
/// over `pause` when both are requested.
pub struct ParsingContext<'a> {
    path: &'a CompiledPath,
    location: &'a MatchLocation,
    store: &'a mut TransientStore,
    signal: Signal,
}

impl<'a> ParsingContext<'a> {
    pub(crate) fn new(
        path: &'a CompiledPath,
        location: &'a MatchLocation,
        store: &'a mut TransientStore,
    ) -> Self {
        Self {
            path,
            location,
            store,
            signal: Signal::default(),
        }
    }

    /// Suspend the session after this callback; resume picks up exactly here
    #[inline]
    pub fn pause(&mut self) {
        self.signal.pause = true;
    }

    /// End the session after this callback
    #[inline]
    pub fn stop(&mut self) {
        self.signal.stop = true;
    }

    /// Stop matching inside the innermost container still open
    ///
    /// Remaining members or elements of that container are still read and
    /// validated, and values already being captured around it still include
    /// them, but no binding matches anything within.
    #[inline]
    pub fn skip_children(&mut self) {
        self.signal.skip_children = true;
    }

    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.signal.pause
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.signal.stop
    }

    /// Path of the binding being notified
    #[inline]
    #[must_use]
    pub fn compiled_path(&self) -> &CompiledPath {
        self.path
    }

    /// Normalized location of the matched node
    #[inline]
    #[must_use]
    pub fn current_path(&self) -> &str {
        &self.location.path
    }

    #[inline]
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.location.field.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn array_index(&self) -> Option<usize> {
        self.location.index
    }

    /// Store a value for later callbacks of the same session
    pub fn save(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.store.insert(key.into(), value);
    }

    #[must_use]
    pub fn load(&self, key: &str) -> Option<&serde_json::Value> {
        self.store.get(key)
    }

    #[inline]
    pub(crate) fn signal(&self) -> Signal {
        self.signal
    }
}
