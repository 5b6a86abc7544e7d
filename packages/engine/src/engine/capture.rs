//! Matches in flight between detection and delivery

use std::rc::Rc;

use super::context::MatchLocation;
use crate::matcher::{FilterGuard, FullMatch};
use crate::provider::ValueAssembler;

/// Value being assembled for a matched container
#[derive(Debug)]
pub(crate) struct Capture<V> {
    pub depth: usize,
    pub assembler: ValueAssembler<V>,
    pub matches: Vec<SlotMatch>,
    pub location: MatchLocation,
}

/// All the ways a node matched one path slot
///
/// Each alternative is a set of filter guards that must all pass; the match
/// holds once any alternative is fully satisfied.
#[derive(Debug, Clone)]
pub(crate) struct SlotMatch {
    pub slot: usize,
    pub alternatives: Vec<Vec<FilterGuard>>,
}

impl SlotMatch {
    #[inline]
    pub fn is_unconditional(&self) -> bool {
        self.alternatives.iter().any(Vec::is_empty)
    }
}

/// Complete value waiting for an enclosing filter verdict
#[derive(Debug)]
pub(crate) struct DeferredMatch<V> {
    pub matched: SlotMatch,
    pub value: Rc<V>,
    pub location: Rc<MatchLocation>,
}

/// Value ready to be handed to one binding
#[derive(Debug)]
pub(crate) struct ReadyMatch<V> {
    pub binding: usize,
    pub value: Rc<V>,
    pub location: Rc<MatchLocation>,
}

/// Group the automaton's full matches by path slot
pub(crate) fn group_by_slot(matches: Vec<FullMatch>) -> Vec<SlotMatch> {
    let mut grouped: Vec<SlotMatch> = Vec::new();
    for found in matches {
        match grouped.iter_mut().find(|g| g.slot == found.path) {
            Some(group) => {
                if !group.alternatives.contains(&found.guards) {
                    group.alternatives.push(found.guards);
                }
            }
            None => grouped.push(SlotMatch {
                slot: found.path,
                alternatives: vec![found.guards],
            }),
        }
    }
    grouped
}
