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

//! This module provides the configuration of the matcher: the behavior flags
//! and the problem files which the command line tool is able to load.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use serde::{
    de::{MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};

/// The behavior flags of a matcher. All flags are off by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// May a label be matched with itself ?
    pub allow_self_match: bool,
    /// When set, every label is paired with a label that is matched back
    /// with it (the number of labels must then be even)
    pub allow_reciprocal_match: bool,
    /// Shuffle the traversal order before each search
    pub randomize_order: bool,
    /// Seed of the random number generator (for reproducible shuffles)
    pub seed: Option<u64>,
}

/// The error that is raised when a problem file cannot be loaded
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid problem description
    #[error("invalid problem file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A complete problem description, as found in a yaml file:
///
/// ```yaml
/// names: [oak, elm, pine, fir]
/// forbidden:
///   oak: elm
/// mandatory:
///   pine: oak
/// allow_self_match: false
/// randomize_order: true
/// seed: 42
/// ```
///
/// The forbidden and mandatory pairs are kept in the order of the file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProblemFile {
    /// The labels to match
    pub names: Vec<String>,
    /// The forbidden (source, target) pairs
    #[serde(deserialize_with = "ordered_pairs")]
    pub forbidden: Vec<(String, String)>,
    /// The mandatory (source, target) pairs
    #[serde(deserialize_with = "ordered_pairs")]
    pub mandatory: Vec<(String, String)>,
    /// May a label be matched with itself ?
    pub allow_self_match: bool,
    /// Must every label be paired with a label that is matched back with it ?
    pub allow_reciprocal_match: bool,
    /// Shuffle the traversal order before each search (left to the caller
    /// when the file does not say)
    pub randomize_order: Option<bool>,
    /// Seed of the random number generator
    pub seed: Option<u64>,
}

impl ProblemFile {
    /// Parses a problem description from a yaml document
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }
    /// Loads a problem description from the given yaml file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }
    /// Returns the behavior flags of this problem. `randomize_by_default`
    /// is used when the file does not tell whether to shuffle.
    pub fn config(&self, randomize_by_default: bool) -> MatcherConfig {
        MatcherConfig {
            allow_self_match: self.allow_self_match,
            allow_reciprocal_match: self.allow_reciprocal_match,
            randomize_order: self.randomize_order.unwrap_or(randomize_by_default),
            seed: self.seed,
        }
    }
}

/// Reads a yaml mapping of names into a list of pairs, in document order
fn ordered_pairs<'de, D>(deserializer: D) -> Result<Vec<(String, String)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, String)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping from names to names")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(pair) = map.next_entry::<String, String>()? {
                pairs.push(pair);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

// #############################################################################
// ### UNIT TESTS ##############################################################
// #############################################################################

#[cfg(test)]
mod tests_config {
    use super::*;

    #[test]
    fn flags_are_off_by_default() {
        let config = MatcherConfig::default();
        assert!(!config.allow_self_match);
        assert!(!config.allow_reciprocal_match);
        assert!(!config.randomize_order);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn it_parses_a_complete_problem() {
        let problem = ProblemFile::from_yaml_str(
            "names: [oak, elm, pine, fir]\n\
             forbidden:\n  oak: elm\n\
             mandatory:\n  pine: oak\n\
             allow_reciprocal_match: true\n\
             seed: 42\n",
        )
        .unwrap();

        assert_eq!(problem.names, vec!["oak", "elm", "pine", "fir"]);
        assert_eq!(problem.forbidden, vec![("oak".to_string(), "elm".to_string())]);
        assert_eq!(problem.mandatory, vec![("pine".to_string(), "oak".to_string())]);
        assert!(problem.allow_reciprocal_match);
        assert!(!problem.allow_self_match);
        assert_eq!(problem.randomize_order, None);
        assert_eq!(problem.seed, Some(42));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let problem = ProblemFile::from_yaml_str("names: [a, b]\n").unwrap();
        assert!(problem.forbidden.is_empty());
        assert!(problem.mandatory.is_empty());
        assert_eq!(problem.config(false), MatcherConfig::default());
    }

    #[test]
    fn pairs_keep_the_order_of_the_file() {
        let problem = ProblemFile::from_yaml_str(
            "names: [a, b, c, z]\n\
             mandatory:\n  z: a\n  b: c\n  a: b\n",
        )
        .unwrap();
        let sources = problem
            .mandatory
            .iter()
            .map(|(s, _)| s.as_str())
            .collect::<Vec<_>>();
        assert_eq!(sources, vec!["z", "b", "a"]);
    }

    #[test]
    fn an_explicit_randomize_flag_wins_over_the_default() {
        let unset = ProblemFile::from_yaml_str("names: [a, b]\n").unwrap();
        assert!(unset.config(true).randomize_order);
        assert!(!unset.config(false).randomize_order);

        let off = ProblemFile::from_yaml_str("randomize_order: false\n").unwrap();
        assert!(!off.config(true).randomize_order);

        let on = ProblemFile::from_yaml_str("randomize_order: true\nseed: 3\n").unwrap();
        assert_eq!(
            on.config(false),
            MatcherConfig {
                randomize_order: true,
                seed: Some(3),
                ..MatcherConfig::default()
            }
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            ProblemFile::from_yaml_str("names: {oops"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn missing_files_are_reported_with_their_path() {
        let err = ProblemFile::load("/definitely/not/here.yaml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
