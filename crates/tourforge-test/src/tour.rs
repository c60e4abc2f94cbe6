//! Assertions on solver output.

use std::collections::HashSet;

use tourforge_core::{City, Map};

/// Asserts that `path` is a closed tour of every active city in `map`.
///
/// With one active city the path must be just the start city. Otherwise it
/// must begin and end at `start` and visit every other active city exactly
/// once in between.
///
/// # Panics
///
/// Panics with a description of the first violation found.
pub fn assert_valid_tour(map: &Map, start: &str, path: &[City]) {
    let active = map.active_count();
    if active == 1 {
        assert_eq!(path.len(), 1, "single-city tour should be [start]");
        assert_eq!(path[0].name(), start);
        return;
    }

    assert_eq!(path.len(), active + 1, "tour should have one entry per city plus the return");
    assert_eq!(path.first().map(City::name), Some(start), "tour should begin at the start city");
    assert_eq!(path.last().map(City::name), Some(start), "tour should end at the start city");

    let mut seen = HashSet::new();
    for city in &path[..path.len() - 1] {
        assert!(map.is_active(city.name()), "{} is not active", city.name());
        assert!(seen.insert(city.name()), "{} is visited twice", city.name());
    }
}
