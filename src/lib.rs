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

//! # matched-map
//!
//! A constrained bijection generator. Given a set of unique names, it assigns
//! each name a partner drawn from the same set so that every name is used
//! exactly once as a partner. The assignment is subject to configurable
//! constraints: no self match, no reciprocal pairs (or, conversely, only
//! mutual pairs), forbidden pairs and mandatory matches.
//!
//! The assignment is completed by a depth first search which commits to the
//! first solution it finds. Shuffling the traversal order makes repeated
//! searches yield different solutions.

mod engine;
mod state;

pub mod config;

pub use config::*;
pub use engine::*;
pub use state::*;

/// The types you will want to use when working with a matcher
pub mod prelude {
    pub use crate::{Assignment, MatchError, MatchResult, Matcher, MatcherConfig};
}
