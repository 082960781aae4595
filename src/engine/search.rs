//
// matched-map is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License  v3
// as published by the Free Software Foundation.
//
// matched-map is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY.
// See the GNU Lesser General Public License  for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with matched-map. If not, see http://www.gnu.org/licenses/lgpl-3.0.en.html
//
// Copyright (c)  2022 by X. Gillard
//

//! This module provides the depth first search which completes a (partial)
//! assignment. The search keeps an explicit stack of choice points and
//! records every tentative decision in a reversible store; undoing a decision
//! is a matter of restoring the state that was saved right before it.
//!
//! # Note
//! The search commits to the first complete assignment it finds. It has no
//! deadline: when the constraints leave very few admissible pairs, it may
//! explore a number of nodes that grows exponentially with the number of
//! labels before it reports that no assignment exists.

use log::{debug, trace};

use crate::{ReversibleStore, SaveAndRestore, Slot};

use super::{Filter, LabelId};

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~ WORKING STATE ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// The working assignment of the search. For each label it knows the target
/// the label is matched with (when used as a source) and the source which
/// consumed it (when used as a target). A label is available as a target for
/// as long as no source consumed it.
#[derive(Debug, Clone)]
pub struct WorkingState {
    /// The reversible slots backing the working assignment
    store: ReversibleStore<Option<LabelId>>,
    /// For each label, the slot holding its target
    targets: Vec<Slot>,
    /// For each label, the slot holding the source that consumed it
    sources: Vec<Slot>,
}

impl WorkingState {
    /// Creates a working state where none of the `n` labels is assigned
    pub fn new(n: usize) -> Self {
        let mut store = ReversibleStore::new();
        let targets = (0..n).map(|_| store.manage(None)).collect();
        let sources = (0..n).map(|_| store.manage(None)).collect();
        Self {
            store,
            targets,
            sources,
        }
    }
    /// Returns the number of labels in the working state
    pub fn len(&self) -> usize {
        self.targets.len()
    }
    /// Returns true iff the working state has no label
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
    /// Returns the target of the given source (if it is assigned)
    pub fn target_of(&self, source: LabelId) -> Option<LabelId> {
        self.store.get(self.targets[source.0])
    }
    /// Returns the source which consumed the given target (if any)
    pub fn source_of(&self, target: LabelId) -> Option<LabelId> {
        self.store.get(self.sources[target.0])
    }
    /// Returns true iff the given source has a target
    pub fn is_assigned(&self, source: LabelId) -> bool {
        self.target_of(source).is_some()
    }
    /// Returns true iff no source has consumed the given target yet
    pub fn is_available(&self, target: LabelId) -> bool {
        self.source_of(target).is_none()
    }
    /// Matches `source` with `target` and consumes the target
    pub(crate) fn assign(&mut self, source: LabelId, target: LabelId) {
        self.store.set(self.targets[source.0], Some(target));
        self.store.set(self.sources[target.0], Some(source));
    }
}

impl SaveAndRestore for WorkingState {
    fn save_state(&mut self) {
        self.store.save_state()
    }

    fn restore_state(&mut self) {
        self.store.restore_state()
    }
}

//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~ SEARCH ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
//~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Some statistics about the last search that was run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// How many choice points were opened
    pub nodes: usize,
    /// How many choice points were exhausted (and hence abandoned)
    pub backtracks: usize,
}

/// A choice point of the search: the source being decided and the position
/// (in the candidates order) of the next candidate to try
#[derive(Debug, Clone, Copy)]
struct ChoicePoint {
    source: LabelId,
    next: usize,
}

/// The depth first search. Sources are decided in the `sources` order and,
/// for each of them, candidates are tried in the `candidates` order.
pub struct Search<'a> {
    /// The order in which sources are decided
    sources: &'a [LabelId],
    /// The order in which candidates are tried
    candidates: &'a [LabelId],
    /// The filters that must admit a decision for it to be tried
    filters: Vec<&'a dyn Filter>,
    /// When set, deciding `s -> c` for a free `c` also decides `c -> s`
    mutual: bool,
}

impl<'a> Search<'a> {
    /// Creates a new search with no filter
    pub fn new(sources: &'a [LabelId], candidates: &'a [LabelId]) -> Self {
        Self {
            sources,
            candidates,
            filters: vec![],
            mutual: false,
        }
    }
    /// Adds a filter to the search
    pub fn filter(mut self, filter: &'a dyn Filter) -> Self {
        self.filters.push(filter);
        self
    }
    /// Tells whether decisions match the candidate back with the source
    pub fn mutual(mut self, mutual: bool) -> Self {
        self.mutual = mutual;
        self
    }

    /// Completes the assignment held in the working state. Upon success, the
    /// complete list of (source, target) pairs is returned in the sources
    /// order. `None` is returned when the search space is exhausted.
    pub fn solve(&self, state: &mut WorkingState) -> (Option<Vec<(LabelId, LabelId)>>, SearchStats) {
        let mut stats = SearchStats::default();
        let mut stack: Vec<ChoicePoint> = vec![];

        'descend: loop {
            match self.first_unassigned(state) {
                None => {
                    debug!("search completed: {stats:?}");
                    return (Some(self.collect(state)), stats);
                }
                Some(source) => {
                    stats.nodes += 1;
                    stack.push(ChoicePoint { source, next: 0 });
                }
            }

            while let Some(top) = stack.last_mut() {
                let source = top.source;
                if let Some(pos) = self.next_candidate(state, source, top.next) {
                    top.next = pos + 1;
                    let candidate = self.candidates[pos];
                    trace!("decide {source:?} -> {candidate:?} (depth {})", stack.len());

                    state.save_state();
                    self.decide(state, source, candidate);
                    continue 'descend;
                }

                // this choice point is exhausted: undo the decision of its parent
                stack.pop();
                stats.backtracks += 1;
                trace!("backtrack from {source:?}");
                if !stack.is_empty() {
                    state.restore_state();
                }
            }

            debug!("search exhausted: {stats:?}");
            return (None, stats);
        }
    }

    /// Returns the first source (in sources order) that has no target yet
    fn first_unassigned(&self, state: &WorkingState) -> Option<LabelId> {
        self.sources
            .iter()
            .copied()
            .find(|s| !state.is_assigned(*s))
    }

    /// Returns the position of the first admissible candidate for `source`
    /// starting at position `from` in the candidates order
    fn next_candidate(&self, state: &WorkingState, source: LabelId, from: usize) -> Option<usize> {
        (from..self.candidates.len()).find(|pos| {
            let candidate = self.candidates[*pos];
            state.is_available(candidate)
                && self
                    .filters
                    .iter()
                    .all(|f| f.admits(state, source, candidate))
        })
    }

    /// Tentatively matches `source` with `candidate`
    fn decide(&self, state: &mut WorkingState, source: LabelId, candidate: LabelId) {
        let free = !state.is_assigned(candidate);
        state.assign(source, candidate);
        if self.mutual && free && source != candidate {
            state.assign(candidate, source);
        }
    }

    /// Lists the decided pairs in the sources order
    fn collect(&self, state: &WorkingState) -> Vec<(LabelId, LabelId)> {
        self.sources
            .iter()
            .filter_map(|s| state.target_of(*s).map(|t| (*s, t)))
            .collect()
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
