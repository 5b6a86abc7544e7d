//! Path matching automaton
//!
//! Tracks, for every open container, which registered paths are still
//! alive and how far each has progressed. Bindings registered with
//! structurally equal paths share one path slot, so their match states
//! are computed once per node.

mod automaton;
mod state;

pub use automaton::{Automaton, FullMatch, GuardTarget, Transition};
pub use state::{ChildKey, FilterGuard, MatchState};
