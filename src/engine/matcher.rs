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

//! This module provides the matcher: the entry point of the crate. A matcher
//! is built over a set of unique labels (and optionally some mandatory
//! matches), it can be told which pairs are forbidden, and then produces
//! matched maps on demand.
//!
//! # Example
//! ```
//! use matched_map::prelude::*;
//!
//! let mut matcher = Matcher::new(["oak", "elm", "pine", "fir"]).unwrap();
//! let map = matcher.generate().unwrap();
//!
//! assert!(map.is_permutation_of(["oak", "elm", "pine", "fir"]));
//! for (source, target) in map.iter() {
//!     assert_ne!(source, target);
//!     assert_ne!(map.get(target), Some(source));
//! }
//! ```

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::MatcherConfig;

use super::{
    Assignment, ForbiddenPairs, LabelId, LabelSet, MatchError, MatchResult, MutualPairing,
    Mutually, NoReciprocalMatch, NoSelfMatch, Search, SearchStats, WorkingState,
};

/// The constraint satisfaction engine which builds matched maps
#[derive(Debug, Clone)]
pub struct Matcher {
    /// The labels being matched
    labels: LabelSet,
    /// The order in which candidates are tried (and free sources decided)
    order: Vec<LabelId>,
    /// The matches that are fixed once and for all
    mandatory: Vec<(LabelId, LabelId)>,
    /// The pairs that must never be produced
    forbidden: ForbiddenPairs,
    /// The behavior flags
    config: MatcherConfig,
    /// The source of randomness for all shuffles
    rng: StdRng,
    /// The last assignment that was successfully generated
    last: Assignment,
    /// Statistics about the last search
    stats: SearchStats,
}

impl Matcher {
    /// Creates a new matcher over the given labels.
    ///
    /// # Errors
    /// `InvalidInput` if there is no label, `DuplicateLabel` if a label occurs
    /// more than once and `InvalidLabel` if a label is empty.
    pub fn new<I, S>(labels: I) -> MatchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_mandatory(labels, std::iter::empty::<(&str, &str)>())
    }

    /// Creates a new matcher over the given labels where some matches are
    /// decided up front. Mandatory matches are never reconsidered by the
    /// search, whatever the flags and the forbidden pairs say.
    ///
    /// # Errors
    /// Same as `new`, plus `UnknownLabel` when a mandatory match refers to a
    /// label which is not in the set, `DuplicateLabel` when a source has more
    /// than one mandatory match and `DuplicateTarget` when two mandatory
    /// matches share the same target.
    pub fn with_mandatory<I, S, M, K, V>(labels: I, mandatory: M) -> MatchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        M: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let labels = LabelSet::new(labels)?;

        let mut fixed = WorkingState::new(labels.len());
        let mut pairs = vec![];
        for (source, target) in mandatory {
            let source = labels.resolve(source.as_ref())?;
            let target = labels.resolve(target.as_ref())?;
            if fixed.is_assigned(source) {
                return Err(MatchError::DuplicateLabel(labels.name(source).to_string()));
            }
            if !fixed.is_available(target) {
                return Err(MatchError::DuplicateTarget(labels.name(target).to_string()));
            }
            fixed.assign(source, target);
            pairs.push((source, target));
        }

        Ok(Self {
            order: labels.ids().collect(),
            labels,
            mandatory: pairs,
            forbidden: ForbiddenPairs::default(),
            config: MatcherConfig::default(),
            rng: StdRng::from_entropy(),
            last: Assignment::default(),
            stats: SearchStats::default(),
        })
    }

    /// Applies the given configuration to this matcher (reseeding its
    /// random number generator when the configuration carries a seed)
    pub fn with_config(mut self, config: MatcherConfig) -> Self {
        self.config = config;
        if let Some(seed) = config.seed {
            self.seed(seed);
        }
        self
    }

    /// Reseeds the random number generator so that the shuffles become
    /// reproducible
    pub fn seed(&mut self, seed: u64) {
        self.config.seed = Some(seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Returns the current configuration of this matcher
    pub fn config(&self) -> MatcherConfig {
        self.config
    }
    /// Returns the labels this matcher works with
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// May a label be matched with itself ?
    pub fn allow_self_match(&self) -> bool {
        self.config.allow_self_match
    }
    /// Allows (or not) a label to be matched with itself
    pub fn set_allow_self_match(&mut self, allow: bool) -> &mut Self {
        self.config.allow_self_match = allow;
        self
    }
    /// Must every pair be mutual ?
    pub fn allow_reciprocal_match(&self) -> bool {
        self.config.allow_reciprocal_match
    }
    /// When set, the search pairs labels two by two: whenever `a -> b` then
    /// `b -> a`. Otherwise, no reciprocal pair is ever produced.
    pub fn set_allow_reciprocal_match(&mut self, allow: bool) -> &mut Self {
        self.config.allow_reciprocal_match = allow;
        self
    }
    /// Is the traversal order shuffled before each search ?
    pub fn randomize_order(&self) -> bool {
        self.config.randomize_order
    }
    /// Shuffles (or not) the traversal order before each search
    pub fn set_randomize_order(&mut self, randomize: bool) -> &mut Self {
        self.config.randomize_order = randomize;
        self
    }

    /// Replaces the set of forbidden pairs. There is at most one forbidden
    /// target per source: when a source occurs more than once, the last pair
    /// wins.
    ///
    /// # Errors
    /// `InvalidLabel` when a name is empty, `UnknownLabel` when a name does
    /// not belong to the label set. The current forbidden pairs are left
    /// untouched when an error occurs.
    pub fn set_forbidden_pairs<I, K, V>(&mut self, pairs: I) -> MatchResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let resolved = pairs
            .into_iter()
            .map(|(s, t)| -> MatchResult<(LabelId, LabelId)> {
                Ok((self.labels.resolve(s.as_ref())?, self.labels.resolve(t.as_ref())?))
            })
            .collect::<MatchResult<Vec<_>>>()?;

        self.forbidden = ForbiddenPairs::new(resolved);
        Ok(())
    }

    /// Iterates over the forbidden pairs (in no particular order)
    pub fn forbidden_pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.forbidden
            .iter()
            .map(|(s, t)| (self.labels.name(s), self.labels.name(t)))
    }

    /// Generates a new matched map which satisfies all the constraints. The
    /// entries of the map are exposed in a random order.
    ///
    /// # Errors
    /// `OddCount` when reciprocal matching is required over an odd number
    /// of labels, `NoSolution` when no assignment satisfies the constraints.
    pub fn generate(&mut self) -> MatchResult<Assignment> {
        let n = self.labels.len();
        if n == 0 {
            return Ok(Assignment::default());
        }

        let mutual = self.config.allow_reciprocal_match;
        if mutual && n % 2 != 0 {
            return Err(MatchError::OddCount(n));
        }

        if self.config.randomize_order {
            self.order.shuffle(&mut self.rng);
        }
        debug!(
            "generating a matched map over {n} names ({} mandatory, {} forbidden, {:?})",
            self.mandatory.len(),
            self.forbidden.len(),
            self.config
        );

        let mut state = WorkingState::new(n);
        for (source, target) in self.mandatory.iter().copied() {
            state.assign(source, target);
        }
        if mutual && !self.mandatory_is_mutual(&state) {
            debug!("the mandatory matches cannot be paired");
            return Err(MatchError::NoSolution);
        }

        let sources = self.sources_order();
        let both_ways = Mutually(&self.forbidden);
        let mut search = Search::new(&sources, &self.order).mutual(mutual);
        if !self.config.allow_self_match {
            search = search.filter(&NoSelfMatch);
        }
        if mutual {
            search = search.filter(&MutualPairing).filter(&both_ways);
        } else {
            search = search.filter(&NoReciprocalMatch).filter(&self.forbidden);
        }

        let (solution, stats) = search.solve(&mut state);
        self.stats = stats;
        let solution = solution.ok_or(MatchError::NoSolution)?;

        let mut assignment = Assignment::new(
            solution
                .into_iter()
                .map(|(s, t)| (self.labels.name(s).to_string(), self.labels.name(t).to_string()))
                .collect(),
        );
        // otherwise the mandatory matches always come out first
        assignment.shuffle_order(&mut self.rng);

        self.last = assignment.clone();
        Ok(assignment)
    }

    /// Returns the last map that was successfully generated (empty if there
    /// is none)
    pub fn last_assignment(&self) -> &Assignment {
        &self.last
    }

    /// Returns the statistics of the last search
    pub fn last_stats(&self) -> SearchStats {
        self.stats
    }

    /// Mandatory sources come first (in the order they were given), then
    /// all other labels in traversal order
    fn sources_order(&self) -> Vec<LabelId> {
        let mut sources = self.mandatory.iter().map(|(s, _)| *s).collect::<Vec<_>>();
        sources.extend(
            self.order
                .iter()
                .copied()
                .filter(|l| !self.mandatory.iter().any(|(s, _)| s == l)),
        );
        sources
    }

    /// True iff no mandatory match prevents the labels from being paired
    fn mandatory_is_mutual(&self, state: &WorkingState) -> bool {
        self.mandatory.iter().all(|(source, target)| {
            source == target || state.target_of(*target).map_or(true, |t| t == *source)
        })
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
