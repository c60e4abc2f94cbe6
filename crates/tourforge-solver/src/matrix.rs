//! Dense distance snapshot of the active cities.
//!
//! Searches work on city indices into this matrix instead of names, so a
//! tour is a `Vec<usize>` and every leg is a single array read.

use tourforge_core::{City, Map, MapError};

use crate::error::{Result, SolveError};

#[derive(Debug, Clone)]
pub(crate) struct DistanceMatrix {
    cities: Vec<City>,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Validates the start city and the graph, then snapshots the active
    /// cities in name order.
    ///
    /// Returns the matrix and the index of the start city.
    pub(crate) fn for_tour(map: &Map, start: &str) -> Result<(Self, usize)> {
        map.active_city(start).map_err(SolveError::InvalidStartCity)?;
        map.ensure_complete().map_err(SolveError::InvalidMap)?;

        let cities: Vec<City> = map.active_cities().cloned().collect();
        let n = cities.len();
        let mut values = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = map
                    .distance_between(cities[i].name(), cities[j].name())
                    .map_err(SolveError::InvalidMap)?
                    .value();
                values[i * n + j] = d;
                values[j * n + i] = d;
            }
        }

        let start = cities.iter().position(|c| c.name() == start).ok_or_else(|| {
            SolveError::InvalidStartCity(MapError::ActiveCityNotFound(start.to_string()))
        })?;
        Ok((Self { cities, values }, start))
    }

    pub(crate) fn len(&self) -> usize {
        self.cities.len()
    }

    pub(crate) fn get(&self, a: usize, b: usize) -> f64 {
        self.values[a * self.cities.len() + b]
    }

    pub(crate) fn city(&self, index: usize) -> &City {
        &self.cities[index]
    }

    /// Sum of consecutive legs along `order`.
    pub(crate) fn tour_length(&self, order: &[usize]) -> f64 {
        order.windows(2).map(|leg| self.get(leg[0], leg[1])).sum()
    }

    pub(crate) fn to_cities(&self, order: &[usize]) -> Vec<City> {
        order.iter().map(|&i| self.cities[i].clone()).collect()
    }
}
