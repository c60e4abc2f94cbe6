//! Map fixtures. Every map returned here has all of its cities active
//! unless stated otherwise.

use tourforge_core::{City, Map};

/// Builds a map from `(name, x, y)` triples and activates every city.
pub fn map_with_all_active<'a>(cities: impl IntoIterator<Item = (&'a str, f64, f64)>) -> Map {
    let mut map = Map::new(
        cities
            .into_iter()
            .map(|(name, x, y)| City::new(name, x, y)),
    );
    map.activate_all();
    map
}

/// Three collinear cities: City1 (0, 0), City2 (3, 4), City3 (6, 8).
///
/// Every closed tour has length 20.
pub fn three_city_map() -> Map {
    map_with_all_active([
        ("City1", 0.0, 0.0),
        ("City2", 3.0, 4.0),
        ("City3", 6.0, 8.0),
    ])
}

/// Eight scattered cities, small enough for brute force.
pub fn eight_city_map() -> Map {
    map_with_all_active([
        ("City1", 0.0, 0.0),
        ("City2", 3.0, 8.0),
        ("City3", 6.0, 7.0),
        ("City4", 2.0, 8.0),
        ("City5", 7.0, 1.0),
        ("City6", 1.0, 3.0),
        ("City7", 9.0, 5.0),
        ("City8", 7.0, 2.0),
    ])
}

/// `count` cities `C00`, `C01`, ... laid out row by row on a grid four
/// columns wide.
pub fn grid_map(count: usize) -> Map {
    let mut map = Map::new((0..count).map(|i| {
        City::new(format!("C{:02}", i), (i % 4) as f64, (i / 4) as f64)
    }));
    map.activate_all();
    map
}

/// [`three_city_map`] plus an active `Island` city with no distances, so
/// completeness does not hold.
pub fn incomplete_map() -> Map {
    let mut map = three_city_map();
    map.insert_active_unchecked(City::new("Island", 100.0, 100.0));
    map
}
