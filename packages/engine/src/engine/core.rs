//! Event handling: frames, captures and filter resolution

use std::collections::VecDeque;
use std::rc::Rc;

use super::capture::{Capture, DeferredMatch, ReadyMatch, SlotMatch, group_by_slot};
use super::context::{MatchLocation, TransientStore};
use super::frame::Frame;
use crate::config::{CaptureMode, JsonPathListener, SurfingConfiguration, SurfingOptions};
use crate::error::{SurfResult, protocol_error};
use crate::filter::FilterEvaluator;
use crate::lexer::{JsonEvent, ScalarValue};
use crate::matcher::{Automaton, ChildKey, FullMatch, GuardTarget, MatchState, Transition};
use crate::path::{CompiledPath, PathSegment};
use crate::provider::{JsonProvider, SerdeJsonProvider, ValueAssembler};
use crate::stats::SurfingStats;

/// Runtime state of one binding
pub(crate) struct BindingState<V> {
    pub path: CompiledPath,
    pub mode: CaptureMode,
    pub listener: Option<Box<dyn JsonPathListener<V>>>,
    pub collected: Vec<V>,
}

impl<V> BindingState<V> {
    /// A satisfied collect-one binding takes no further part in matching
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.mode == CaptureMode::CollectOne && !self.collected.is_empty()
    }
}

/// Region of the document excluded from matching by `skip_children`
#[derive(Debug, Clone, Copy)]
struct SkipRegion {
    /// Containers opened inside the region and not yet closed
    nested: usize,
}

/// Event-driven matcher shared by all session kinds
pub struct SurfingEngine<P: JsonProvider> {
    pub(super) provider: P,
    automaton: Automaton,
    pub(super) bindings: Vec<BindingState<P::Value>>,
    options: SurfingOptions,
    root_states: Vec<MatchState>,
    frames: Vec<Frame>,
    captures: Vec<Capture<P::Value>>,
    deferred: Vec<DeferredMatch<P::Value>>,
    pub(super) ready: VecDeque<ReadyMatch<P::Value>>,
    skip: Option<SkipRegion>,
    pub(super) store: TransientStore,
    pub(super) stats: SurfingStats,
}

impl<P: JsonProvider> SurfingEngine<P> {
    pub fn new(config: SurfingConfiguration<P>) -> Self {
        let mut automaton = Automaton::new();
        let bindings: Vec<_> = config
            .bindings
            .into_iter()
            .map(|binding| {
                automaton.register(&binding.path, binding.id.index());
                BindingState {
                    path: binding.path,
                    mode: binding.mode,
                    listener: binding.listener,
                    collected: Vec::new(),
                }
            })
            .collect();
        let root_states = automaton.initial_states();

        tracing::debug!(
            target: "jsurf::engine",
            bindings = bindings.len(),
            slots = automaton.slot_count(),
            "engine configured"
        );

        Self {
            provider: config.provider,
            automaton,
            bindings,
            options: config.options,
            root_states,
            frames: Vec::new(),
            captures: Vec::new(),
            deferred: Vec::new(),
            ready: VecDeque::new(),
            skip: None,
            store: TransientStore::new(),
            stats: SurfingStats::new(),
        }
    }

    #[inline]
    pub fn options(&self) -> &SurfingOptions {
        &self.options
    }

    #[inline]
    pub fn stats(&self) -> &SurfingStats {
        &self.stats
    }

    #[inline]
    pub(crate) fn stats_mut(&mut self) -> &mut SurfingStats {
        &mut self.stats
    }

    /// Current container nesting
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Values collected so far for a collect-all or collect-one binding
    pub fn collected(&self, binding: usize) -> &[P::Value] {
        self.bindings
            .get(binding)
            .map_or(&[][..], |b| b.collected.as_slice())
    }

    pub fn take_collected(&mut self, binding: usize) -> Vec<P::Value> {
        self.bindings
            .get_mut(binding)
            .map(|b| std::mem::take(&mut b.collected))
            .unwrap_or_default()
    }

    /// Whether matches are waiting to be dispatched
    #[inline]
    pub fn has_ready(&self) -> bool {
        !self.ready.is_empty()
    }

    /// Process one event located at document `offset`
    ///
    /// # Errors
    ///
    /// Returns a protocol error for event sequences that do not form a
    /// document, or when the nesting limit is exceeded.
    pub fn handle_event(&mut self, event: JsonEvent, offset: u64) -> SurfResult<()> {
        self.stats.record_event();
        if self.skip_event(&event, offset)? {
            return Ok(());
        }

        // values under construction see every event before frames change
        self.feed(&event);
        match event {
            JsonEvent::FieldName(name) => {
                match self.frames.last_mut() {
                    Some(frame) if frame.is_object => {
                        frame.field = Some(name);
                        Ok(())
                    }
                    _ => Err(protocol_error("member name outside of an object", offset)),
                }
            }
            JsonEvent::StartObject => self.open(true, offset),
            JsonEvent::StartArray => self.open(false, offset),
            JsonEvent::Scalar(scalar) => self.scalar(scalar, offset),
            JsonEvent::EndObject => self.close(true, offset),
            JsonEvent::EndArray => self.close(false, offset),
        }
    }

    /// Check that the document ended cleanly
    ///
    /// # Errors
    ///
    /// Returns a protocol error if containers are still open.
    pub fn finish(&mut self, offset: u64) -> SurfResult<()> {
        if !self.frames.is_empty() {
            return Err(protocol_error(
                format!("document ended with {} open containers", self.frames.len()),
                offset,
            ));
        }
        self.deferred.clear();
        tracing::debug!(
            target: "jsurf::engine",
            events = self.stats.events,
            matches = self.stats.matches_delivered,
            "document complete"
        );
        Ok(())
    }

    fn open(&mut self, is_object: bool, offset: u64) -> SurfResult<()> {
        let depth = self.frames.len() + 1;
        self.check_depth(depth, offset)?;
        self.stats.record_depth(depth);

        let transition = self.enter_child(depth, true, offset)?;
        let matches = self.without_overlaps(transition.matches);
        if !matches.is_empty() {
            let location = self.location();
            self.captures.push(Capture {
                depth,
                assembler: ValueAssembler::begin(&self.provider, is_object),
                matches: group_by_slot(matches),
                location,
            });
        }

        let candidate = if transition.guards.is_empty() {
            None
        } else {
            Some(ValueAssembler::begin(&SerdeJsonProvider, is_object))
        };
        self.frames.push(Frame {
            is_object,
            field: None,
            index: None,
            states: transition.alive,
            guards: transition.guards,
            candidate,
        });
        Ok(())
    }

    fn scalar(&mut self, scalar: ScalarValue, offset: u64) -> SurfResult<()> {
        let depth = self.frames.len() + 1;
        let transition = self.enter_child(depth, false, offset)?;
        let matches = self.without_overlaps(transition.matches);
        if matches.is_empty() && transition.guards.is_empty() {
            return Ok(());
        }

        let verdicts = if transition.guards.is_empty() {
            Vec::new()
        } else {
            self.verdicts(&transition.guards, &scalar.to_json())
        };

        if !matches.is_empty() {
            let location = Rc::new(self.location());
            let value = Rc::new(self.provider.primitive(scalar));
            self.settle(group_by_slot(matches), &value, &location);
        }
        if !verdicts.is_empty() {
            self.resolve_guards(depth, &verdicts);
        }
        Ok(())
    }

    fn close(&mut self, is_object: bool, offset: u64) -> SurfResult<()> {
        let depth = self.frames.len();
        let frame = match self.frames.pop() {
            Some(frame) if frame.is_object == is_object => frame,
            _ => return Err(protocol_error("mismatched container end", offset)),
        };

        if self.captures.last().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = self.captures.pop() {
                let value = capture
                    .assembler
                    .finish()
                    .ok_or_else(|| protocol_error("incomplete value at container end", offset))?;
                self.settle(capture.matches, &Rc::new(value), &Rc::new(capture.location));
            }
        }

        if let Some(candidate) = frame.candidate {
            let value = candidate
                .finish()
                .ok_or_else(|| protocol_error("incomplete filter candidate at container end", offset))?;
            let verdicts = self.verdicts(&frame.guards, &value);
            self.resolve_guards(depth, &verdicts);
        }
        Ok(())
    }

    /// Advance the parent's key and step the automaton into the new child
    fn enter_child(&mut self, depth: usize, is_container: bool, offset: u64) -> SurfResult<Transition> {
        if let Some(frame) = self.frames.last_mut() {
            if frame.is_object {
                if frame.field.is_none() {
                    return Err(protocol_error("object member without a name", offset));
                }
            } else {
                frame.next_index();
            }
        }

        let (parent, key) = match self.frames.last() {
            Some(frame) => match frame.current_key() {
                Some(key) => (frame.states.as_slice(), key),
                None => return Err(protocol_error("value without a key", offset)),
            },
            None => (self.root_states.as_slice(), ChildKey::Root),
        };
        if parent.is_empty() {
            return Ok(Transition::default());
        }

        let automaton = &self.automaton;
        let bindings = &self.bindings;
        let transition = automaton.step(parent, key, depth, is_container, |slot| {
            automaton
                .bindings(slot)
                .iter()
                .any(|b| bindings.get(*b).is_some_and(|b| !b.is_inert()))
        });
        Ok(transition)
    }

    /// Drop matches nested inside a value that is already being captured
    fn without_overlaps(&self, matches: Vec<FullMatch>) -> Vec<FullMatch> {
        if self.options.skip_overlapped_path && !self.captures.is_empty() {
            Vec::new()
        } else {
            matches
        }
    }

    fn check_depth(&self, depth: usize, offset: u64) -> SurfResult<()> {
        match self.options.max_depth {
            Some(max) if depth > max => Err(protocol_error(
                format!("maximum nesting depth {max} exceeded"),
                offset,
            )),
            _ => Ok(()),
        }
    }

    /// Push an event into every value under construction
    fn feed(&mut self, event: &JsonEvent) {
        for capture in &mut self.captures {
            capture.assembler.push(&self.provider, event);
        }
        for frame in &mut self.frames {
            if let Some(candidate) = frame.candidate.as_mut() {
                candidate.push(&SerdeJsonProvider, event);
            }
        }
    }

    /// Normalized location of the node currently being entered
    fn location(&self) -> MatchLocation {
        let Some(parent) = self.frames.last() else {
            return MatchLocation::root();
        };
        let mut path = String::from("$");
        for frame in &self.frames {
            frame.write_key(&mut path);
        }
        MatchLocation {
            path,
            field: if parent.is_object { parent.field.clone() } else { None },
            index: if parent.is_object { None } else { parent.index },
        }
    }

    fn verdicts(&self, guards: &[GuardTarget], candidate: &serde_json::Value) -> Vec<(GuardTarget, bool)> {
        guards
            .iter()
            .map(|target| {
                let passed = match self.automaton.path(target.path).segments().get(target.segment) {
                    Some(PathSegment::Filter(expr)) => FilterEvaluator::evaluate_predicate(candidate, expr),
                    _ => false,
                };
                (*target, passed)
            })
            .collect()
    }

    /// Queue unconditional matches and defer guarded ones
    fn settle(&mut self, matches: Vec<SlotMatch>, value: &Rc<P::Value>, location: &Rc<MatchLocation>) {
        let mut ready = Vec::new();
        for matched in matches {
            if matched.is_unconditional() {
                ready.push(matched.slot);
            } else {
                self.deferred.push(DeferredMatch {
                    matched,
                    value: Rc::clone(value),
                    location: Rc::clone(location),
                });
            }
        }
        self.enqueue(&ready, value, location);
    }

    /// Apply filter verdicts for the node at `depth` to deferred matches
    fn resolve_guards(&mut self, depth: usize, verdicts: &[(GuardTarget, bool)]) {
        if self.deferred.is_empty() {
            return;
        }

        let mut released: Vec<DeferredMatch<P::Value>> = Vec::new();
        for mut pending in std::mem::take(&mut self.deferred) {
            pending.matched.alternatives.retain_mut(|guards| {
                let mut holds = true;
                guards.retain(|guard| {
                    if guard.depth != depth {
                        return true;
                    }
                    let passed = verdicts.iter().any(|(target, passed)| {
                        *passed && target.path == guard.path && target.segment == guard.segment
                    });
                    holds &= passed;
                    false
                });
                holds
            });

            if pending.matched.is_unconditional() {
                released.push(pending);
            } else if !pending.matched.alternatives.is_empty() {
                self.deferred.push(pending);
            }
        }

        // Matches released for the same node are delivered together in binding order
        let mut i = 0;
        while i < released.len() {
            let value = Rc::clone(&released[i].value);
            let location = Rc::clone(&released[i].location);
            let mut slots = Vec::new();
            while i < released.len() && Rc::ptr_eq(&released[i].value, &value) {
                slots.push(released[i].matched.slot);
                i += 1;
            }
            self.enqueue(&slots, &value, &location);
        }
    }

    fn enqueue(&mut self, slots: &[usize], value: &Rc<P::Value>, location: &Rc<MatchLocation>) {
        let mut targets: Vec<usize> = slots
            .iter()
            .flat_map(|slot| self.automaton.bindings(*slot).iter().copied())
            .filter(|b| self.bindings.get(*b).is_some_and(|b| !b.is_inert()))
            .collect();
        targets.sort_unstable();
        targets.dedup();

        for binding in targets {
            self.ready.push_back(ReadyMatch {
                binding,
                value: Rc::clone(value),
                location: Rc::clone(location),
            });
        }
    }

    /// Begin skipping the rest of the innermost open container
    pub(super) fn begin_skip(&mut self) {
        if !self.frames.is_empty() {
            self.skip = Some(SkipRegion { nested: 0 });
        }
    }

    /// Handle an event inside a skipped region; `false` hands it to normal processing
    fn skip_event(&mut self, event: &JsonEvent, offset: u64) -> SurfResult<bool> {
        let Some(mut region) = self.skip else {
            return Ok(false);
        };

        match event {
            JsonEvent::StartObject | JsonEvent::StartArray => {
                region.nested += 1;
                self.check_depth(self.frames.len() + region.nested, offset)?;
            }
            JsonEvent::EndObject | JsonEvent::EndArray if region.nested == 0 => {
                self.skip = None;
                return Ok(false);
            }
            JsonEvent::EndObject | JsonEvent::EndArray => region.nested -= 1,
            JsonEvent::FieldName(_) | JsonEvent::Scalar(_) => {}
        }

        self.skip = Some(region);
        self.feed(event);
        Ok(true)
    }
}
