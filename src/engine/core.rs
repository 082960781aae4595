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

//! This module provides the definition of the matcher's core abstractions
//! (label identifiers and the errors which may be raised along the way).

/// The identifier of an interned label. Labels are numbered densely, in the
/// order in which they were given to the matcher.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelId(pub(crate) usize);

impl LabelId {
    /// Returns the position of this label in the label set
    pub fn index(self) -> usize {
        self.0
    }
}

/// This is the kind of error that gets raised whenever the matcher is
/// misconfigured or whenever the search fails to produce an assignment
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq, Hash)]
pub enum MatchError {
    /// The label set is empty
    #[error("provide a non empty list of names")]
    InvalidInput,
    /// The same label occurs more than once in the label set
    #[error("duplicate entry in names ({0})")]
    DuplicateLabel(String),
    /// A label is malformed (it is empty)
    #[error("invalid name: \"{0}\"")]
    InvalidLabel(String),
    /// A constraint refers to a label that is not part of the label set
    #[error("unrecognized name: \"{0}\"")]
    UnknownLabel(String),
    /// Two mandatory assignments share the same target
    #[error("name \"{0}\" is the target of more than one mandatory match")]
    DuplicateTarget(String),
    /// Reciprocal matching was requested with an odd number of labels
    #[error("number of names must be even for reciprocal matching (got {0})")]
    OddCount(usize),
    /// The search was exhausted without completing an assignment
    #[error("cannot generate map")]
    NoSolution,
}

/// The result of a matcher operation. (Note: all configuration and search
/// operations can fail, in which case they raise a MatchError)
pub type MatchResult<T> = Result<T, MatchError>;
