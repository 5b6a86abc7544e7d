//! Compiled path representation

use std::fmt;
use std::sync::Arc;

use super::ast::PathSegment;

/// Immutable, validated sequence of path segments
///
/// Produced once per expression by [`PathCompiler`](super::PathCompiler) or
/// [`PathBuilder`](super::PathBuilder). Cloning is cheap. Equality is
/// structural: `$.a` and `$['a']` compare equal.
#[derive(Debug, Clone)]
pub struct CompiledPath {
    segments: Arc<[PathSegment]>,
    expression: Arc<str>,
}

impl CompiledPath {
    /// Wraps segments that already satisfy the path invariants
    pub(crate) fn new(segments: Vec<PathSegment>, expression: String) -> Self {
        Self {
            segments: segments.into(),
            expression: expression.into(),
        }
    }

    /// Expression text this path was compiled from
    #[inline]
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    #[inline]
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments including the root
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for compiled paths; a path holds at least `$`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn has_recursive_descent(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, PathSegment::RecursiveDescent))
    }

    #[inline]
    #[must_use]
    pub fn has_filter(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, PathSegment::Filter(_)))
    }

    /// Whether the path can select at most one node of any document
    #[must_use]
    pub fn is_definite(&self) -> bool {
        !self
            .segments
            .iter()
            .any(|s| s.is_multi_select() || matches!(s, PathSegment::RecursiveDescent))
    }

    /// Canonical bracket-notation rendering of the segments
    #[must_use]
    pub fn canonical(&self) -> String {
        self.segments.iter().map(ToString::to_string).collect()
    }
}

impl PartialEq for CompiledPath {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl fmt::Display for CompiledPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
