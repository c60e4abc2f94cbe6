//! Solver facade binding a map and a start city.

use std::sync::Arc;

use tourforge_core::Map;

use crate::brute_force;
use crate::error::Result;
use crate::genetic::{GeneticParams, GeneticSolver};
use crate::nearest_neighbor;
use crate::outcome::SolveOutcome;
use crate::progress::{SolverHandle, SolverProgress};
use crate::run::run_search;

/// Runs tour searches over the active cities of an owned [`Map`].
///
/// Every solve method takes `&mut self`: one search runs at a time and the
/// map cannot change underneath it. Use [`TourSolver::handle`] to stop a
/// search or watch its progress from another thread.
///
/// # Example
///
/// ```
/// use tourforge_core::{City, Map};
/// use tourforge_solver::TourSolver;
///
/// let mut map = Map::new([
///     City::new("City1", 0.0, 0.0),
///     City::new("City2", 3.0, 4.0),
///     City::new("City3", 6.0, 8.0),
/// ]);
/// map.activate_all();
///
/// let mut solver = TourSolver::new(map, "City1");
/// let exact = solver.brute_force().unwrap().into_solution().unwrap();
/// let greedy = solver.nearest_neighbor().unwrap().into_solution().unwrap();
///
/// assert_eq!(exact.total_distance(), 20.0);
/// assert_eq!(exact.names(), greedy.names());
/// ```
#[derive(Debug)]
pub struct TourSolver {
    map: Map,
    start_city: String,
    progress: Arc<SolverProgress>,
    genetic: GeneticSolver,
}

impl TourSolver {
    /// Creates a solver. The start city is checked when a search runs.
    pub fn new(map: Map, start_city: impl Into<String>) -> Self {
        Self {
            map,
            start_city: start_city.into(),
            progress: Arc::new(SolverProgress::new()),
            genetic: GeneticSolver::new(),
        }
    }

    /// Seeds the genetic algorithm so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.genetic = self.genetic.with_seed(seed);
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    /// Mutable access for activating and deactivating cities between runs.
    pub fn map_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    pub fn start_city(&self) -> &str {
        &self.start_city
    }

    pub fn set_start_city(&mut self, name: impl Into<String>) {
        self.start_city = name.into();
    }

    /// Returns a handle sharing this solver's stop flags and estimates.
    pub fn handle(&self) -> SolverHandle {
        SolverHandle::new(
            Arc::clone(&self.progress),
            Arc::clone(self.genetic.progress()),
        )
    }

    /// Requests the running search to stop. See [`SolverHandle::request_stop`].
    pub fn request_stop(&self) -> bool {
        self.handle().request_stop()
    }

    /// Estimated seconds until the running search completes, zero when idle.
    pub fn estimated_remaining_time(&self) -> f64 {
        self.handle().estimated_remaining_time()
    }

    pub fn is_solving(&self) -> bool {
        self.handle().is_solving()
    }

    /// Builds a tour by always walking to the nearest unvisited city.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidStartCity`](crate::SolveError::InvalidStartCity)
    /// or [`SolveError::InvalidMap`](crate::SolveError::InvalidMap).
    pub fn nearest_neighbor(&mut self) -> Result<SolveOutcome> {
        run_search(
            &self.progress,
            &self.map,
            &self.start_city,
            nearest_neighbor::ALGORITHM,
            nearest_neighbor::search,
        )
    }

    /// Finds the shortest tour by trying every ordering of the cities.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidStartCity`](crate::SolveError::InvalidStartCity)
    /// or [`SolveError::InvalidMap`](crate::SolveError::InvalidMap).
    pub fn brute_force(&mut self) -> Result<SolveOutcome> {
        run_search(
            &self.progress,
            &self.map,
            &self.start_city,
            brute_force::ALGORITHM,
            brute_force::search,
        )
    }

    /// Evolves a tour with the genetic algorithm.
    ///
    /// The parameters are validated before the start city and the map.
    ///
    /// # Errors
    ///
    /// Any parameter error of [`GeneticParams::new`], then
    /// [`SolveError::InvalidStartCity`](crate::SolveError::InvalidStartCity)
    /// or [`SolveError::InvalidMap`](crate::SolveError::InvalidMap).
    pub fn genetic_algorithm(
        &mut self,
        population_size: i64,
        generations: i64,
        mutation_rate: f64,
    ) -> Result<SolveOutcome> {
        let params = GeneticParams::new(population_size, generations, mutation_rate)?;
        self.genetic_with(&params)
    }

    /// Evolves a tour with already validated parameters.
    pub fn genetic_with(&mut self, params: &GeneticParams) -> Result<SolveOutcome> {
        self.genetic.solve(&self.map, &self.start_city, params)
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
