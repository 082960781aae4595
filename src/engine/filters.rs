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

//! This module provides the filters which decide whether a candidate target
//! may be tentatively assigned to a source during the search. A filter only
//! ever looks at the working state; it never modifies it.

use rustc_hash::FxHashMap;

use super::{LabelId, WorkingState};

/// A filter is consulted by the search for every (source, candidate) couple
/// it considers. The candidate is rejected as soon as one filter says so.
pub trait Filter {
    /// Returns true iff `source -> candidate` is an admissible decision in
    /// the given working state
    fn admits(&self, state: &WorkingState, source: LabelId, candidate: LabelId) -> bool;
}

/// Any closure/function that accepts the working state and a (source,
/// candidate) couple can be a filter.
impl<F: Fn(&WorkingState, LabelId, LabelId) -> bool> Filter for F {
    fn admits(&self, state: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        self(state, source, candidate)
    }
}

/// Rejects any label being matched with itself
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelfMatch;

impl Filter for NoSelfMatch {
    fn admits(&self, _: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        source != candidate
    }
}

/// Rejects a candidate which is already matched with the source (that is, it
/// rejects the decisions that would close a reciprocal pair)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReciprocalMatch;

impl Filter for NoReciprocalMatch {
    fn admits(&self, state: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        state.target_of(candidate) != Some(source)
    }
}

/// Only admits the decisions that keep every pair mutual: the candidate must
/// either be free or already point back to the source, and a source that is
/// already targeted by some label can only be matched with that label.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutualPairing;

impl Filter for MutualPairing {
    fn admits(&self, state: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        let candidate_ok = match state.target_of(candidate) {
            None => true,
            Some(t) => t == source,
        };
        let source_ok = match state.source_of(source) {
            None => true,
            Some(s) => s == candidate,
        };
        candidate_ok && source_ok
    }
}

/// The set of forbidden (source, target) pairs. There is at most one
/// forbidden target per source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenPairs {
    pairs: FxHashMap<LabelId, LabelId>,
}

impl ForbiddenPairs {
    /// Creates a new set of forbidden pairs. When a source occurs more than
    /// once, the last pair wins.
    pub fn new<I: IntoIterator<Item = (LabelId, LabelId)>>(pairs: I) -> Self {
        Self {
            pairs: pairs.into_iter().collect(),
        }
    }
    /// Returns true iff `source -> target` is forbidden
    pub fn forbids(&self, source: LabelId, target: LabelId) -> bool {
        self.pairs.get(&source) == Some(&target)
    }
    /// Returns the number of forbidden pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }
    /// Returns true iff nothing is forbidden
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
    /// Iterates over the forbidden pairs (in no particular order)
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, LabelId)> + '_ {
        self.pairs.iter().map(|(s, t)| (*s, *t))
    }
}

impl Filter for ForbiddenPairs {
    fn admits(&self, _: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        !self.forbids(source, candidate)
    }
}

/// Applies the inner filter in both directions whenever the decision also
/// matches the (still free) candidate back with the source.
#[derive(Debug, Clone, Copy)]
pub struct Mutually<'a, F: Filter>(pub &'a F);

impl<F: Filter> Filter for Mutually<'_, F> {
    fn admits(&self, state: &WorkingState, source: LabelId, candidate: LabelId) -> bool {
        let forth = self.0.admits(state, source, candidate);
        if state.target_of(candidate).is_none() {
            forth && self.0.admits(state, candidate, source)
        } else {
            forth
        }
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
