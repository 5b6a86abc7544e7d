//! Matcher state types

use std::fmt;

/// How a node is reached from its parent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKey<'a> {
    /// The document root
    Root,
    Field(&'a str),
    Index(usize),
}

impl fmt::Display for ChildKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Root => f.write_str("$"),
            ChildKey::Field(name) => {
                f.write_str("['")?;
                for c in name.chars() {
                    match c {
                        '\'' => f.write_str("\\'")?,
                        '\\' => f.write_str("\\\\")?,
                        c => write!(f, "{c}")?,
                    }
                }
                f.write_str("']")
            }
            ChildKey::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Filter segment a match depends on
///
/// The match holds only if the predicate of `segment` in path slot `path`
/// accepts the node at nesting `depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterGuard {
    pub depth: usize,
    pub path: usize,
    pub segment: usize,
}

/// Progress of one path slot at one node
///
/// `cursor` is the index of the next segment to satisfy. The root is
/// segment 0, so the states attached to a container describe what its
/// children must look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub path: usize,
    pub cursor: usize,
    pub guards: Vec<FilterGuard>,
}
