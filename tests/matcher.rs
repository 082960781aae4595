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

//! These tests exercise the public api of the matcher the way a caller would.

use matched_map::prelude::*;

const NAMES: [&str; 11] = [
    "oak", "elm", "pine", "spruce", "mahogany", "birch", "juniper", "beech", "poplar", "fir",
    "baobab",
];

fn check_permutation(map: &Assignment, names: &[&str]) {
    assert_eq!(map.len(), names.len());
    assert!(map.is_permutation_of(names.iter().copied()));
}

#[test]
fn default_maps_have_no_self_match_and_no_reciprocal_pair() {
    for seed in 0..20 {
        let mut matcher = Matcher::new(NAMES).unwrap();
        matcher.set_randomize_order(true).seed(seed);
        let map = matcher.generate().unwrap();

        check_permutation(&map, &NAMES);
        for (source, target) in map.iter() {
            assert_ne!(source, target);
            assert_ne!(map.get(target), Some(source));
        }
    }
}

#[test]
fn reciprocal_matching_requires_an_even_count() {
    let mut matcher = Matcher::new(NAMES).unwrap();
    matcher.set_allow_reciprocal_match(true);
    assert_eq!(matcher.generate(), Err(MatchError::OddCount(11)));
    assert!(matcher.last_assignment().is_empty());
}

#[test]
fn reciprocal_matching_pairs_every_name() {
    let names = &NAMES[..10];
    for seed in 0..20 {
        let mut matcher = Matcher::new(names.iter().copied()).unwrap();
        matcher
            .set_allow_reciprocal_match(true)
            .set_randomize_order(true)
            .seed(seed);
        let map = matcher.generate().unwrap();

        check_permutation(&map, names);
        for (source, target) in map.iter() {
            assert_ne!(source, target);
            assert_eq!(map.get(target), Some(source));
        }
    }
}

#[test]
fn forbidden_pairs_are_never_produced() {
    let mut forbid_mapper = Matcher::new(NAMES).unwrap();
    let forbidden = forbid_mapper.generate().unwrap();

    for seed in 0..20 {
        let mut mapper = Matcher::new(NAMES).unwrap();
        mapper.set_randomize_order(true).seed(seed);
        mapper.set_forbidden_pairs(forbidden.iter()).unwrap();
        let map = mapper.generate().unwrap();

        check_permutation(&map, &NAMES);
        for (source, target) in map.iter() {
            assert_ne!(forbidden.get(source), Some(target));
        }
    }
}

#[test]
fn forbidden_pairs_are_honored_in_both_directions_when_pairing() {
    let names = ["a", "b", "c", "d"];
    let mut matcher = Matcher::new(names).unwrap();
    matcher.set_allow_reciprocal_match(true);
    matcher.set_forbidden_pairs([("b", "a"), ("d", "c")]).unwrap();

    let map = matcher.generate().unwrap();
    assert_ne!(map.get("a"), Some("b"));
    assert_ne!(map.get("c"), Some("d"));
    for (source, target) in map.iter() {
        assert_eq!(map.get(target), Some(source));
    }
}

#[test]
fn invalid_forbidden_pairs_are_rejected_without_side_effect() {
    let mut forbid_mapper = Matcher::new(NAMES).unwrap();
    let mut forbidden = forbid_mapper
        .generate()
        .unwrap()
        .into_iter()
        .collect::<Vec<_>>();
    forbidden.push(("aspen".to_string(), "oak".to_string()));

    let mut mapper = Matcher::new(NAMES).unwrap();
    mapper.set_forbidden_pairs([("oak", "elm")]).unwrap();

    assert_eq!(
        mapper.set_forbidden_pairs(forbidden.iter().map(|(s, t)| (s, t))),
        Err(MatchError::UnknownLabel("aspen".to_string()))
    );
    assert_eq!(
        mapper.set_forbidden_pairs([("oak", "")]),
        Err(MatchError::InvalidLabel(String::new()))
    );
    assert_eq!(mapper.forbidden_pairs().collect::<Vec<_>>(), vec![("oak", "elm")]);
}

#[test]
fn forbidden_pairs_are_replaced_wholesale() {
    let mut matcher = Matcher::new(["a", "b", "c"]).unwrap();
    matcher.set_forbidden_pairs([("a", "b"), ("b", "c")]).unwrap();
    matcher.set_forbidden_pairs([("c", "a")]).unwrap();
    assert_eq!(matcher.forbidden_pairs().collect::<Vec<_>>(), vec![("c", "a")]);
}

#[test]
fn construction_is_validated() {
    assert_eq!(
        Matcher::new(["a", "b", "a"]).unwrap_err(),
        MatchError::DuplicateLabel("a".to_string())
    );
    assert_eq!(
        Matcher::new(Vec::<String>::new()).unwrap_err(),
        MatchError::InvalidInput
    );
}

#[test]
fn the_canonical_example() {
    let mut matcher = Matcher::new(["a", "b", "c", "d"]).unwrap();
    let map = matcher.generate().unwrap();
    check_permutation(&map, &["a", "b", "c", "d"]);
    assert_eq!(map.get("a"), Some("b"));
    assert_eq!(map.get("b"), Some("c"));
    assert_eq!(map.get("c"), Some("d"));
    assert_eq!(map.get("d"), Some("a"));
}

#[test]
fn the_last_assignment_is_the_one_just_returned() {
    let mut matcher = Matcher::new(NAMES).unwrap();
    matcher.set_randomize_order(true);
    for _ in 0..5 {
        let map = matcher.generate().unwrap();
        assert_eq!(matcher.last_assignment(), &map);
    }
}

#[test]
fn mandatory_matches_survive_randomization() {
    let mut matcher =
        Matcher::with_mandatory(NAMES, [("oak", "baobab"), ("fir", "elm")]).unwrap();
    matcher.set_randomize_order(true).seed(3);
    for _ in 0..10 {
        let map = matcher.generate().unwrap();
        check_permutation(&map, &NAMES);
        assert_eq!(map.get("oak"), Some("baobab"));
        assert_eq!(map.get("fir"), Some("elm"));
    }
}

#[test]
fn errors_are_readable() {
    assert_eq!(
        MatchError::DuplicateLabel("a".into()).to_string(),
        "duplicate entry in names (a)"
    );
    assert_eq!(
        MatchError::UnknownLabel("aspen".into()).to_string(),
        "unrecognized name: \"aspen\""
    );
    assert_eq!(MatchError::NoSolution.to_string(), "cannot generate map");
}
