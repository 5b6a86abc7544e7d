//! Bindings between compiled paths and their consumers

use std::fmt;

use crate::engine::ParsingContext;
use crate::path::CompiledPath;

/// Callback receiving matched values
///
/// Returning an error terminates the session with
/// [`SurfError::Listener`](crate::error::SurfError::Listener).
pub trait JsonPathListener<V> {
    fn on_value(&mut self, value: &V, context: &mut ParsingContext<'_>) -> anyhow::Result<()>;
}

impl<V, F> JsonPathListener<V> for F
where
    F: FnMut(&V, &mut ParsingContext<'_>) -> anyhow::Result<()>,
{
    #[inline]
    fn on_value(&mut self, value: &V, context: &mut ParsingContext<'_>) -> anyhow::Result<()> {
        self(value, context)
    }
}

/// Identifies a binding within its configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(pub(crate) usize);

impl BindingId {
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// What happens with values matched by a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Hand every match to the listener
    FirePerMatch,
    /// Accumulate every match in the session
    CollectAll,
    /// Keep the first match, then stop tracking the path
    CollectOne,
}

/// One registered path with its consumer
pub struct Binding<V> {
    pub(crate) id: BindingId,
    pub(crate) path: CompiledPath,
    pub(crate) mode: CaptureMode,
    pub(crate) listener: Option<Box<dyn JsonPathListener<V>>>,
}

impl<V> Binding<V> {
    #[inline]
    pub fn id(&self) -> BindingId {
        self.id
    }

    #[inline]
    pub fn path(&self) -> &CompiledPath {
        &self.path
    }

    #[inline]
    pub fn mode(&self) -> CaptureMode {
        self.mode
    }
}

impl<V> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("id", &self.id)
            .field("path", &self.path.expression())
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
