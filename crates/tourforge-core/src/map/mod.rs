//! The activatable complete-graph map.
//!
//! A [`Map`] knows every city it was built with, but only the *active* cities
//! take part in a tour. Distances are materialized for active cities only and
//! are kept in lockstep with activation:
//!
//! - activating a city inserts a distance to every other active city
//! - deactivating a city removes every distance touching it
//!
//! so the distance set is always exactly the complete graph over the active
//! cities.
//!
//! Logging levels:
//! - **INFO**: random activation
//! - **DEBUG**: single activations and deactivations

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{MapError, Result};
use crate::geometry::{City, Distance};

/// Order-independent key for a pair of city names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PairKey(String, String);

impl PairKey {
    fn new(a: &str, b: &str) -> Self {
        if a <= b {
            PairKey(a.to_string(), b.to_string())
        } else {
            PairKey(b.to_string(), a.to_string())
        }
    }
}

/// A complete graph over a dynamically activatable subset of cities.
///
/// # Example
///
/// ```
/// use tourforge_core::{City, Map};
///
/// let mut map = Map::new([
///     City::new("City1", 0.0, 0.0),
///     City::new("City2", 3.0, 4.0),
///     City::new("City3", 6.0, 8.0),
/// ]);
///
/// map.activate_all();
/// assert!(map.check_completeness());
/// assert_eq!(map.distance_between("City1", "City2").unwrap().value(), 5.0);
///
/// map.deactivate("City2").unwrap();
/// assert_eq!(map.distance_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Map {
    cities: BTreeMap<String, City>,
    active: BTreeMap<String, City>,
    distances: HashMap<PairKey, Distance>,
}

impl Map {
    /// Creates a map over the given cities with no city activated.
    ///
    /// Cities are keyed by name. If a name repeats with different
    /// coordinates, the first occurrence is kept.
    pub fn new(cities: impl IntoIterator<Item = City>) -> Self {
        let mut by_name: BTreeMap<String, City> = BTreeMap::new();
        for city in cities {
            match by_name.get(city.name()) {
                Some(existing) if existing != &city => {
                    warn!(
                        event = "duplicate_city",
                        name = city.name(),
                        "ignoring city with a name already in use"
                    );
                }
                Some(_) => {}
                None => {
                    by_name.insert(city.name().to_string(), city);
                }
            }
        }

        Self {
            cities: by_name,
            active: BTreeMap::new(),
            distances: HashMap::new(),
        }
    }

    /// Looks a city up among all known cities.
    pub fn city(&self, name: &str) -> Result<&City> {
        self.cities
            .get(name)
            .ok_or_else(|| MapError::CityNotFound(name.to_string()))
    }

    /// Looks a city up among the active cities.
    pub fn active_city(&self, name: &str) -> Result<&City> {
        self.active
            .get(name)
            .ok_or_else(|| MapError::ActiveCityNotFound(name.to_string()))
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    /// All known cities, in name order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.values()
    }

    /// Active cities, in name order.
    pub fn active_cities(&self) -> impl Iterator<Item = &City> {
        self.active.values()
    }

    pub fn distances(&self) -> impl Iterator<Item = &Distance> {
        self.distances.values()
    }

    pub fn city_count(&self) -> usize {
        self.cities.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn distance_count(&self) -> usize {
        self.distances.len()
    }

    /// Activates a city by name.
    ///
    /// Activating an already active city leaves the map unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Activation`] if no city has this name.
    pub fn activate(&mut self, name: &str) -> Result<()> {
        let city = self
            .city(name)
            .map_err(|e| MapError::activation(name, e))?
            .clone();
        self.insert_active(city);
        debug!(event = "city_activated", name, active = self.active.len());
        Ok(())
    }

    /// Deactivates an active city by name, dropping every distance touching it.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Deactivation`] if the city is not active.
    pub fn deactivate(&mut self, name: &str) -> Result<()> {
        if !self.active.contains_key(name) {
            return Err(MapError::deactivation(
                name,
                MapError::ActiveCityNotFound(name.to_string()),
            ));
        }
        self.remove_active(name);
        debug!(event = "city_deactivated", name, active = self.active.len());
        Ok(())
    }

    /// Activates every known city, one at a time.
    pub fn activate_all(&mut self) {
        let cities: Vec<City> = self.cities.values().cloned().collect();
        for city in cities {
            self.insert_active(city);
        }
    }

    /// Deactivates every active city, one at a time.
    pub fn deactivate_all(&mut self) {
        let names: Vec<String> = self.active.keys().cloned().collect();
        for name in names {
            self.remove_active(&name);
        }
    }

    /// Activates `count` distinct random cities, using the thread-local RNG.
    ///
    /// See [`Map::activate_random_with`].
    pub fn activate_random(&mut self, count: usize, anchor: Option<&str>) -> Result<()> {
        self.activate_random_with(count, anchor, &mut rand::rng())
    }

    /// Activates `count` distinct cities chosen at random from all known cities.
    ///
    /// When `anchor` is given that city is always part of the selection and
    /// counts towards `count`. Cities that are already active stay active.
    ///
    /// # Errors
    ///
    /// - [`MapError::InvalidActivationCount`] if `count` is zero or larger than
    ///   the number of known cities. Nothing is activated.
    /// - [`MapError::Activation`] if the anchor is not a known city.
    pub fn activate_random_with<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        anchor: Option<&str>,
        rng: &mut R,
    ) -> Result<()> {
        let available = self.cities.len();
        if count == 0 || count > available {
            return Err(MapError::InvalidActivationCount {
                requested: count,
                available,
            });
        }

        let mut chosen: Vec<String> = Vec::with_capacity(count);
        if let Some(anchor) = anchor {
            self.city(anchor)
                .map_err(|e| MapError::activation(anchor, e))?;
            chosen.push(anchor.to_string());
        }

        let pool: Vec<&String> = self
            .cities
            .keys()
            .filter(|name| Some(name.as_str()) != anchor)
            .collect();
        chosen.extend(
            pool.choose_multiple(rng, count - chosen.len())
                .map(|name| (*name).clone()),
        );

        for name in &chosen {
            self.activate(name)?;
        }

        info!(
            event = "random_activation",
            requested = count,
            anchor = anchor.unwrap_or(""),
            active = self.active.len(),
        );
        Ok(())
    }

    /// Returns the distance between two active cities.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::DistanceNotFound`] if the names are equal, if either
    /// city is not active, or if no distance is recorded for the pair.
    pub fn distance_between(&self, name_a: &str, name_b: &str) -> Result<&Distance> {
        if name_a == name_b
            || !self.active.contains_key(name_a)
            || !self.active.contains_key(name_b)
        {
            return Err(MapError::distance_not_found(name_a, name_b));
        }
        self.distances
            .get(&PairKey::new(name_a, name_b))
            .ok_or_else(|| MapError::distance_not_found(name_a, name_b))
    }

    /// Returns true if every pair of distinct active cities has a distance.
    pub fn check_completeness(&self) -> bool {
        self.ensure_complete().is_ok()
    }

    /// Like [`Map::check_completeness`], but reports the first missing pair.
    pub fn ensure_complete(&self) -> Result<()> {
        let names: Vec<&String> = self.active.keys().collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                if !self.distances.contains_key(&PairKey::new(a, b)) {
                    return Err(MapError::NotComplete {
                        a: (*a).clone(),
                        b: (*b).clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Marks a city active without recording any distances for it.
    ///
    /// This deliberately breaks the complete-graph invariant and exists only
    /// so tests can exercise the incomplete-map paths.
    #[cfg(any(test, feature = "test-utils"))]
    #[doc(hidden)]
    pub fn insert_active_unchecked(&mut self, city: City) {
        self.active.insert(city.name().to_string(), city);
    }

    fn insert_active(&mut self, city: City) {
        for other in self.active.values() {
            if other.name() == city.name() {
                continue;
            }
            self.distances
                .entry(PairKey::new(other.name(), city.name()))
                .or_insert_with(|| Distance::new(other.clone(), city.clone()));
        }
        self.active.insert(city.name().to_string(), city);
    }

    fn remove_active(&mut self, name: &str) {
        if self.active.remove(name).is_none() {
            return;
        }
        for other in self.active.keys() {
            self.distances.remove(&PairKey::new(name, other));
        }
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Map: {} cities, {} active, {} distances",
            self.cities.len(),
            self.active.len(),
            self.distances.len()
        )?;
        for city in self.active.values() {
            writeln!(f, "  {}", city)?;
        }
        let mut distances: Vec<&Distance> = self.distances.values().collect();
        distances.sort_by(|a, b| {
            (a.city_a().name(), a.city_b().name()).cmp(&(b.city_a().name(), b.city_b().name()))
        });
        for distance in distances {
            writeln!(f, "  {}", distance)?;
        }
        Ok(())
    }
}

/// Sums the distances along a path of active cities.
///
/// Paths of zero or one city have length zero.
///
/// # Errors
///
/// Returns [`MapError::DistanceNotFound`] if two consecutive cities are not
/// joined by a distance in `map`.
pub fn tour_length(map: &Map, path: &[City]) -> Result<f64> {
    path.windows(2)
        .map(|pair| {
            map.distance_between(pair[0].name(), pair[1].name())
                .map(Distance::value)
        })
        .sum()
}
