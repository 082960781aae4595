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

//! This module provides the label set: the interned collection of unique
//! names over which the matcher builds its assignments.

use rustc_hash::FxHashMap;

use super::{LabelId, MatchError, MatchResult};

/// The set of labels a matcher works with. Each label is interned and
/// identified by a `LabelId` which is its position in the original sequence.
#[derive(Debug, Clone, Default)]
pub struct LabelSet {
    /// The names of the labels, indexed by label id
    names: Vec<String>,
    /// Maps each name onto its identifier
    index: FxHashMap<String, LabelId>,
}

impl LabelSet {
    /// Creates a new label set from the given sequence of names.
    ///
    /// # Errors
    /// - `InvalidInput` when the sequence is empty
    /// - `InvalidLabel` when one of the names is the empty string
    /// - `DuplicateLabel` when a name occurs more than once (the first name
    ///   to reoccur is reported)
    pub fn new<I, S>(labels: I) -> MatchResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        for label in labels {
            let label = label.into();
            if label.is_empty() {
                return Err(MatchError::InvalidLabel(label));
            }
            if set.index.contains_key(&label) {
                return Err(MatchError::DuplicateLabel(label));
            }
            let id = LabelId(set.names.len());
            set.index.insert(label.clone(), id);
            set.names.push(label);
        }

        if set.names.is_empty() {
            Err(MatchError::InvalidInput)
        } else {
            Ok(set)
        }
    }

    /// Returns the number of labels in the set
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true iff the set holds no label at all
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the name of the given label
    pub fn name(&self, id: LabelId) -> &str {
        &self.names[id.0]
    }

    /// Returns the identifier of the given name (if it belongs to the set)
    pub fn id_of(&self, name: &str) -> Option<LabelId> {
        self.index.get(name).copied()
    }

    /// Returns true iff the given name belongs to the set
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Resolves a name that is referenced by some constraint.
    ///
    /// # Errors
    /// - `InvalidLabel` when the name is empty
    /// - `UnknownLabel` when the name does not belong to the set
    pub fn resolve(&self, name: &str) -> MatchResult<LabelId> {
        if name.is_empty() {
            return Err(MatchError::InvalidLabel(name.to_string()));
        }
        self.id_of(name)
            .ok_or_else(|| MatchError::UnknownLabel(name.to_string()))
    }

    /// Iterates over all label ids in their original order
    pub fn ids(&self) -> impl Iterator<Item = LabelId> + '_ {
        (0..self.names.len()).map(LabelId)
    }

    /// Iterates over all names in their original order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################
