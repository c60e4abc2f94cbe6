//! Immutable geometry primitives: cities and the distances between them.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A named point on the map.
///
/// Two cities are equal when both the name and the coordinates match.
/// Coordinates are compared bitwise so that `City` can be used as a
/// hash key.
///
/// # Example
///
/// ```
/// use tourforge_core::City;
///
/// let a = City::new("A", 0.0, 0.0);
/// let b = City::new("B", 3.0, 4.0);
/// assert_eq!(a.distance_to(&b), 5.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    name: String,
    x: f64,
    y: f64,
}

impl City {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
    }
}

impl Eq for City {}

impl Hash for City {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.x, self.y)
    }
}

/// The Euclidean distance between an unordered pair of cities.
///
/// The value is computed once on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Distance {
    city_a: City,
    city_b: City,
    value: f64,
}

impl Distance {
    pub fn new(city_a: City, city_b: City) -> Self {
        let value = city_a.distance_to(&city_b);
        Self {
            city_a,
            city_b,
            value,
        }
    }

    pub fn city_a(&self) -> &City {
        &self.city_a
    }

    pub fn city_b(&self) -> &City {
        &self.city_b
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns true if this distance joins the two named cities, in either order.
    pub fn connects(&self, name_a: &str, name_b: &str) -> bool {
        (self.city_a.name() == name_a && self.city_b.name() == name_b)
            || (self.city_a.name() == name_b && self.city_b.name() == name_a)
    }

    /// Returns true if either end of this distance is the named city.
    pub fn touches(&self, name: &str) -> bool {
        self.city_a.name() == name || self.city_b.name() == name
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.city_a.name(),
            self.city_b.name(),
            self.value
        )
    }
}
