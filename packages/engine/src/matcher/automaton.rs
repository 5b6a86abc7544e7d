//! Transition function over compiled paths

use super::state::{ChildKey, FilterGuard, MatchState};
use crate::path::{CompiledPath, PathSegment};

#[derive(Debug)]
struct PathSlot {
    path: CompiledPath,
    bindings: Vec<usize>,
}

/// A node completed a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullMatch {
    pub path: usize,
    /// Filter verdicts the match still depends on
    pub guards: Vec<FilterGuard>,
}

/// A filter segment that must be evaluated against the new node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuardTarget {
    pub path: usize,
    pub segment: usize,
}

/// Result of stepping into one child
#[derive(Debug, Default)]
pub struct Transition {
    /// States to attach to the child if it is a container
    pub alive: Vec<MatchState>,
    /// Paths the child itself completes
    pub matches: Vec<FullMatch>,
    /// Predicates to evaluate against the child
    pub guards: Vec<GuardTarget>,
}

impl Transition {
    fn keep(&mut self, state: MatchState) {
        if !self.alive.contains(&state) {
            self.alive.push(state);
        }
    }
}

enum Selection {
    No,
    Yes,
    Guarded,
}

/// Registry of path slots plus the transition function
#[derive(Debug, Default)]
pub struct Automaton {
    slots: Vec<PathSlot>,
}

impl Automaton {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `binding` for `path`, returning its path slot
    pub fn register(&mut self, path: &CompiledPath, binding: usize) -> usize {
        if let Some(slot) = self.slots.iter().position(|s| s.path == *path) {
            self.slots[slot].bindings.push(binding);
            return slot;
        }
        self.slots.push(PathSlot {
            path: path.clone(),
            bindings: vec![binding],
        });
        self.slots.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Bindings sharing a slot, in registration order
    #[inline]
    #[must_use]
    pub fn bindings(&self, slot: usize) -> &[usize] {
        &self.slots[slot].bindings
    }

    #[inline]
    #[must_use]
    pub fn path(&self, slot: usize) -> &CompiledPath {
        &self.slots[slot].path
    }

    /// States of the virtual frame above the document root
    #[must_use]
    pub fn initial_states(&self) -> Vec<MatchState> {
        (0..self.slots.len())
            .map(|path| MatchState {
                path,
                cursor: 0,
                guards: Vec::new(),
            })
            .collect()
    }

    /// Step from a parent's states into the child reached by `key`
    ///
    /// `depth` is the child's nesting depth and `is_container` whether the
    /// child opens an object or array. Slots for which `is_live` returns
    /// false are skipped.
    pub fn step(
        &self,
        parent: &[MatchState],
        key: ChildKey<'_>,
        depth: usize,
        is_container: bool,
        is_live: impl Fn(usize) -> bool,
    ) -> Transition {
        let mut out = Transition::default();

        for state in parent {
            if !is_live(state.path) {
                continue;
            }
            let segments = self.slots[state.path].path.segments();
            match segments.get(state.cursor) {
                Some(PathSegment::RecursiveDescent) => {
                    if is_container {
                        out.keep(state.clone());
                    }
                    self.advance(state, state.cursor + 1, key, depth, is_container, &mut out);
                }
                Some(_) => self.advance(state, state.cursor, key, depth, is_container, &mut out),
                None => {}
            }
        }

        out
    }

    fn advance(
        &self,
        state: &MatchState,
        at: usize,
        key: ChildKey<'_>,
        depth: usize,
        is_container: bool,
        out: &mut Transition,
    ) {
        let segments = self.slots[state.path].path.segments();
        let Some(segment) = segments.get(at) else {
            return;
        };

        let mut guards = state.guards.clone();
        match selects(segment, key) {
            Selection::No => return,
            Selection::Yes => {}
            Selection::Guarded => {
                let target = GuardTarget {
                    path: state.path,
                    segment: at,
                };
                if !out.guards.contains(&target) {
                    out.guards.push(target);
                }
                guards.push(FilterGuard {
                    depth,
                    path: state.path,
                    segment: at,
                });
            }
        }

        let cursor = at + 1;
        if cursor == segments.len() {
            let found = FullMatch {
                path: state.path,
                guards,
            };
            if !out.matches.contains(&found) {
                out.matches.push(found);
            }
        } else if is_container {
            out.keep(MatchState {
                path: state.path,
                cursor,
                guards,
            });
        }
    }
}

fn selects(segment: &PathSegment, key: ChildKey<'_>) -> Selection {
    let selected = match (segment, key) {
        (PathSegment::Root, ChildKey::Root) => true,
        (_, ChildKey::Root) | (PathSegment::Root, _) => false,
        (PathSegment::ChildName(name), ChildKey::Field(field)) => name == field,
        (PathSegment::MultiSelectNames(names), ChildKey::Field(field)) => names.contains(field),
        (PathSegment::AnyChild, _) => true,
        (PathSegment::ChildIndex(i), ChildKey::Index(index)) => *i == index,
        (PathSegment::MultiSelectIndices(indices), ChildKey::Index(index)) => {
            indices.contains(&index)
        }
        (PathSegment::ArraySlice { start, end, step }, ChildKey::Index(index)) => {
            index >= *start
                && end.is_none_or(|end| index < end)
                && (index - start) % step == 0
        }
        (PathSegment::Filter(_), _) => return Selection::Guarded,
        _ => false,
    };
    if selected { Selection::Yes } else { Selection::No }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::compile;

    fn automaton(paths: &[&str]) -> Automaton {
        let mut automaton = Automaton::new();
        for (binding, path) in paths.iter().enumerate() {
            automaton.register(&compile(path).expect("valid path"), binding);
        }
        automaton
    }

    #[test]
    fn equal_paths_share_a_slot() {
        let automaton = automaton(&["$.a[*]", "$['a'][*]", "$..b"]);
        assert_eq!(automaton.slot_count(), 2);
        assert_eq!(automaton.bindings(0), &[0, 1]);
    }

    #[test]
    fn states_follow_children() {
        let automaton = automaton(&["$.a[*]", "$..b"]);
        let root = automaton.step(&automaton.initial_states(), ChildKey::Root, 1, true, |_| true);
        assert_eq!(root.alive.len(), 2);
        assert!(root.matches.is_empty());

        let a = automaton.step(&root.alive, ChildKey::Field("a"), 2, true, |_| true);
        // the descent state survives, the child-name state advances
        assert_eq!(a.alive.len(), 2);

        let element = automaton.step(&a.alive, ChildKey::Index(0), 3, false, |_| true);
        assert_eq!(element.matches, vec![FullMatch { path: 0, guards: Vec::new() }]);
        assert!(element.alive.is_empty());

        let b = automaton.step(&a.alive, ChildKey::Field("b"), 3, false, |_| true);
        let matched: Vec<usize> = b.matches.iter().map(|m| m.path).collect();
        assert_eq!(matched, vec![0, 1]);
    }

    #[test]
    fn filters_produce_guards() {
        let automaton = automaton(&["$.items[?(@.ok)].name"]);
        let root = automaton.step(&automaton.initial_states(), ChildKey::Root, 1, true, |_| true);
        let items = automaton.step(&root.alive, ChildKey::Field("items"), 2, true, |_| true);
        let item = automaton.step(&items.alive, ChildKey::Index(0), 3, true, |_| true);
        assert_eq!(item.guards, vec![GuardTarget { path: 0, segment: 2 }]);

        let name = automaton.step(&item.alive, ChildKey::Field("name"), 4, false, |_| true);
        assert_eq!(name.matches.len(), 1);
        assert_eq!(name.matches[0].guards, vec![FilterGuard { depth: 3, path: 0, segment: 2 }]);
    }

    #[test]
    fn inert_slots_are_skipped() {
        let automaton = automaton(&["$.a"]);
        let root = automaton.step(&automaton.initial_states(), ChildKey::Root, 1, true, |_| false);
        assert!(root.alive.is_empty() && root.matches.is_empty());
    }
}
