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

//! This module provides the assignment: the matched map which is handed back
//! to the caller once a search succeeds.

use std::fmt;

use rand::{seq::SliceRandom, Rng};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A mapping from each source label onto its partner. The entries are kept
/// in the order in which they are exposed to the caller; that order carries
/// no meaning which is why two assignments are equal whenever they hold the
/// same set of pairs.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// The entries, in the order in which they are exposed
    entries: Vec<(String, String)>,
    /// Maps each source onto its target (when a source is repeated in the
    /// entries, the last one wins)
    index: FxHashMap<String, String>,
}

impl Assignment {
    /// Creates an assignment holding the given entries (in that order)
    pub fn new(entries: Vec<(String, String)>) -> Self {
        let index = entries.iter().cloned().collect();
        Self { entries, index }
    }
    /// Returns the number of entries in the assignment
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Returns true iff the assignment holds no entry
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Returns the partner of the given source (if it has one)
    pub fn get(&self, source: &str) -> Option<&str> {
        self.index.get(source).map(String::as_str)
    }
    /// Returns true iff the assignment maps `source` onto `target`
    pub fn contains_pair(&self, source: &str, target: &str) -> bool {
        self.get(source) == Some(target)
    }
    /// Iterates over the (source, target) pairs of the assignment
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }
    /// Returns true iff every one of the given labels appears exactly once
    /// as a source and exactly once as a target (and nothing else appears)
    pub fn is_permutation_of<'a, I>(&self, labels: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels = labels.into_iter().collect::<FxHashSet<_>>();
        let sources = self.entries.iter().map(|(s, _)| s.as_str()).collect::<FxHashSet<_>>();
        let targets = self.entries.iter().map(|(_, t)| t.as_str()).collect::<FxHashSet<_>>();

        self.entries.len() == labels.len() && sources == labels && targets == labels
    }
    /// Randomizes the order in which the entries are exposed (never the values)
    pub(crate) fn shuffle_order<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.entries.shuffle(rng);
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.index == other.index
    }
}
impl Eq for Assignment {}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (source, target) in self.iter() {
            writeln!(f, "{source} -> {target}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Assignment {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// An assignment is serialized as a map which preserves the exposed order
impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (source, target) in self.iter() {
            map.serialize_entry(source, target)?;
        }
        map.end()
    }
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################

#[cfg(test)]
mod tests_assignment {
    use super::*;

    fn assignment(pairs: &[(&str, &str)]) -> Assignment {
        Assignment::new(
            pairs
                .iter()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
        )
    }

    #[test]
    fn equality_ignores_the_order_of_the_entries() {
        let x = assignment(&[("a", "b"), ("b", "c"), ("c", "a")]);
        let y = assignment(&[("c", "a"), ("a", "b"), ("b", "c")]);
        let z = assignment(&[("a", "c"), ("b", "a"), ("c", "b")]);
        assert_eq!(x, y);
        assert_ne!(x, z);
        assert_ne!(x, Assignment::default());
    }

    #[test]
    fn equality_is_symmetric_when_a_source_is_repeated() {
        let x = assignment(&[("a", "b"), ("a", "b")]);
        let y = assignment(&[("a", "b"), ("c", "d")]);
        assert_ne!(x, y);
        assert_ne!(y, x);
        assert_eq!(x, x.clone());
    }

    #[test]
    fn the_last_entry_of_a_repeated_source_wins() {
        let x = assignment(&[("a", "b"), ("a", "c")]);
        assert_eq!(x.len(), 2);
        assert_eq!(x.get("a"), Some("c"));
    }

    #[test]
    fn get_returns_the_partner_of_a_source() {
        let x = assignment(&[("a", "b"), ("b", "a")]);
        assert_eq!(x.get("a"), Some("b"));
        assert_eq!(x.get("z"), None);
        assert!(x.contains_pair("b", "a"));
        assert!(!x.contains_pair("a", "a"));
    }

    #[test]
    fn permutation_check() {
        let x = assignment(&[("a", "b"), ("b", "c"), ("c", "a")]);
        assert!(x.is_permutation_of(["a", "b", "c"]));
        assert!(!x.is_permutation_of(["a", "b", "c", "d"]));

        let y = assignment(&[("a", "b"), ("b", "b"), ("c", "a")]);
        assert!(!y.is_permutation_of(["a", "b", "c"]));
    }

    #[test]
    fn it_displays_one_line_per_entry() {
        let x = assignment(&[("a", "b"), ("b", "a")]);
        assert_eq!(x.to_string(), "a -> b\nb -> a\n");
    }

    #[test]
    fn it_serializes_as_an_ordered_map() {
        let x = assignment(&[("b", "a"), ("a", "b")]);
        let json = serde_json::to_string(&x).unwrap();
        assert_eq!(json, r#"{"b":"a","a":"b"}"#);
    }
}
