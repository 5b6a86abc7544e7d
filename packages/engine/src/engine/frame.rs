//! Open container bookkeeping

use std::fmt::Write as _;

use crate::matcher::{ChildKey, GuardTarget, MatchState};
use crate::provider::ValueAssembler;

/// One open object or array
#[derive(Debug)]
pub(crate) struct Frame {
    pub is_object: bool,
    /// Member currently being read (objects)
    pub field: Option<String>,
    /// Element currently being read (arrays)
    pub index: Option<usize>,
    /// Live matcher states for this container's children
    pub states: Vec<MatchState>,
    /// Filter predicates to evaluate once this container closes
    pub guards: Vec<GuardTarget>,
    /// This container's value, assembled only when `guards` is non-empty
    pub candidate: Option<ValueAssembler<serde_json::Value>>,
}

impl Frame {
    /// Key of the child currently being read
    #[inline]
    pub fn current_key(&self) -> Option<ChildKey<'_>> {
        if self.is_object {
            self.field.as_deref().map(ChildKey::Field)
        } else {
            self.index.map(ChildKey::Index)
        }
    }

    /// Advance to the next element of an array
    #[inline]
    pub fn next_index(&mut self) -> usize {
        let next = self.index.map_or(0, |i| i + 1);
        self.index = Some(next);
        next
    }

    pub fn write_key(&self, out: &mut String) {
        if let Some(key) = self.current_key() {
            let _ = write!(out, "{key}");
        }
    }
}
