//! Loading cities from a JSON coordinates document.
//!
//! The document is a single object mapping each city name to its
//! coordinates:
//!
//! ```json
//! {
//!     "Berlin": { "x": 13.40, "y": 52.52 },
//!     "Paris":  { "x": 2.35,  "y": 48.86 }
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::LoadError;
use crate::geometry::City;
use crate::map::Map;

#[derive(Debug, Deserialize)]
struct Coordinates {
    x: f64,
    y: f64,
}

/// Parses cities from a JSON string, in name order.
pub fn cities_from_json_str(s: &str) -> Result<Vec<City>, LoadError> {
    let raw: BTreeMap<String, Coordinates> = serde_json::from_str(s)?;
    Ok(raw
        .into_iter()
        .map(|(name, c)| City::new(name, c.x, c.y))
        .collect())
}

/// Reads cities from a JSON file, in name order.
pub fn load_cities(path: impl AsRef<Path>) -> Result<Vec<City>, LoadError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let cities = cities_from_json_str(&contents)?;
    info!(
        event = "cities_loaded",
        path = %path.display(),
        count = cities.len(),
    );
    Ok(cities)
}

impl Map {
    /// Builds a map from a JSON coordinates document. No city is active.
    pub fn from_json_str(s: &str) -> Result<Self, LoadError> {
        cities_from_json_str(s).map(Map::new)
    }

    /// Builds a map from a JSON coordinates file. No city is active.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        load_cities(path).map(Map::new)
    }
}
