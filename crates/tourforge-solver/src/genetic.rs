//! Genetic algorithm over closed tours.
//!
//! Each generation:
//! 1. Fitness: total tour length, evaluated in parallel; lower is fitter.
//! 2. Tournament selection fills a mating pool of `population_size`.
//! 3. Ordered crossover of two distinct pool members produces each child.
//! 4. Mutation swaps two interior cities with probability `mutation_rate`.
//!
//! The fittest member of the final population is returned.
//!
//! Logging levels:
//! - **DEBUG**: progress at most once per second
//! - **TRACE**: best length per generation

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tourforge_config::GeneticConfig;
use tourforge_core::Map;
use tracing::trace;

use crate::error::{Result, SolveError};
use crate::matrix::DistanceMatrix;
use crate::outcome::SolveOutcome;
use crate::progress::{ProgressLog, SolverProgress};
use crate::run::{run_search, IndexTour};

pub(crate) const ALGORITHM: &str = "genetic_algorithm";

const TOURNAMENT_SIZE: usize = 5;

/// Validated genetic algorithm parameters.
///
/// # Example
///
/// ```
/// use tourforge_solver::{GeneticParams, SolveError};
///
/// let params = GeneticParams::new(100, 500, 0.02).unwrap();
/// assert_eq!(params.population_size(), 100);
///
/// assert_eq!(
///     GeneticParams::new(1, 500, 0.02),
///     Err(SolveError::InvalidPopulationSize(1))
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneticParams {
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
}

impl GeneticParams {
    /// Checks each parameter in turn.
    ///
    /// # Errors
    ///
    /// - [`SolveError::InvalidPopulationSize`] if `population_size < 2`
    /// - [`SolveError::InvalidGenerations`] if `generations < 0`
    /// - [`SolveError::InvalidMutationRate`] if `mutation_rate` is not within
    ///   `[0, 1]`, NaN included
    pub fn new(population_size: i64, generations: i64, mutation_rate: f64) -> Result<Self> {
        let population_size = usize::try_from(population_size)
            .ok()
            .filter(|&size| size >= 2)
            .ok_or(SolveError::InvalidPopulationSize(population_size))?;
        let generations = usize::try_from(generations)
            .map_err(|_| SolveError::InvalidGenerations(generations))?;
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(SolveError::InvalidMutationRate(mutation_rate));
        }
        Ok(Self {
            population_size,
            generations,
            mutation_rate,
        })
    }

    /// Validates parameters read from a configuration file.
    pub fn from_config(config: &GeneticConfig) -> Result<Self> {
        Self::new(
            config.population_size,
            config.generations,
            config.mutation_rate,
        )
    }

    pub fn population_size(&self) -> usize {
        self.population_size
    }

    pub fn generations(&self) -> usize {
        self.generations
    }

    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }
}

/// Genetic algorithm engine with its own progress state.
///
/// Validates the start city and the graph itself, so it can be used
/// without a [`TourSolver`](crate::TourSolver).
#[derive(Debug, Clone, Default)]
pub struct GeneticSolver {
    progress: Arc<SolverProgress>,
    seed: Option<u64>,
}

impl GeneticSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the random number generator so runs are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn progress(&self) -> &Arc<SolverProgress> {
        &self.progress
    }

    /// Evolves a tour over the active cities of `map`, starting at `start`.
    ///
    /// # Errors
    ///
    /// [`SolveError::InvalidStartCity`] or [`SolveError::InvalidMap`].
    pub fn solve(&self, map: &Map, start: &str, params: &GeneticParams) -> Result<SolveOutcome> {
        run_search(&self.progress, map, start, ALGORITHM, |matrix, start, progress| {
            let mut rng = match self.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            evolve(matrix, start, params, progress, &mut rng)
        })
    }
}

fn evolve<R: Rng + ?Sized>(
    matrix: &DistanceMatrix,
    start: usize,
    params: &GeneticParams,
    progress: &SolverProgress,
    rng: &mut R,
) -> Option<IndexTour> {
    let started = Instant::now();
    let mut log = ProgressLog::new(ALGORITHM);
    let size = params.population_size;
    let total = params.generations as f64;

    let others: Vec<usize> = (0..matrix.len()).filter(|&c| c != start).collect();
    let mut population: Vec<Vec<usize>> = (0..size)
        .map(|_| random_tour(start, &others, rng))
        .collect();

    for generation in 0..params.generations {
        let fitness = evaluate(matrix, &population);

        let pool: Vec<usize> = (0..size).map(|_| tournament(&fitness, rng)).collect();

        let mut offspring = Vec::with_capacity(size);
        for _ in 0..size {
            let parents = index::sample(rng, pool.len(), 2);
            let parent_a = &population[pool[parents.index(0)]];
            let parent_b = &population[pool[parents.index(1)]];

            let mut child = crossover(parent_a, parent_b, matrix.len(), rng);
            if rng.random::<f64>() < params.mutation_rate {
                mutate(&mut child, rng);
            }
            offspring.push(child);
        }
        population = offspring;

        progress.update_estimate(started.elapsed(), generation as f64, total);
        trace!(
            event = "step",
            algorithm = ALGORITHM,
            generation,
            best = fitness.iter().copied().fold(f64::INFINITY, f64::min),
        );
        log.tick(generation as u64 + 1, progress);

        if progress.is_stop_requested() {
            return None;
        }
    }

    let fitness = evaluate(matrix, &population);
    let best = fittest(&fitness)?;
    Some(IndexTour {
        order: population.swap_remove(best),
        steps: params.generations as u64,
    })
}

fn evaluate(matrix: &DistanceMatrix, population: &[Vec<usize>]) -> Vec<f64> {
    population
        .par_iter()
        .map(|tour| matrix.tour_length(tour))
        .collect()
}

/// Index of the lowest fitness, the first one on ties.
fn fittest(fitness: &[f64]) -> Option<usize> {
    fitness
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| i)
}

fn random_tour<R: Rng + ?Sized>(start: usize, others: &[usize], rng: &mut R) -> Vec<usize> {
    let mut middle = others.to_vec();
    middle.shuffle(rng);

    let mut tour = Vec::with_capacity(others.len() + 2);
    tour.push(start);
    tour.extend_from_slice(&middle);
    tour.push(start);
    tour
}

/// Samples up to [`TOURNAMENT_SIZE`] distinct individuals and returns the
/// fittest.
fn tournament<R: Rng + ?Sized>(fitness: &[f64], rng: &mut R) -> usize {
    let contenders = index::sample(rng, fitness.len(), TOURNAMENT_SIZE.min(fitness.len()));
    contenders
        .iter()
        .min_by(|&a, &b| fitness[a].total_cmp(&fitness[b]))
        .unwrap_or(0)
}

/// Ordered crossover: a prefix of `parent_a`, then the remaining cities in
/// `parent_b`'s order, then the start city again.
fn crossover<R: Rng + ?Sized>(
    parent_a: &[usize],
    parent_b: &[usize],
    city_count: usize,
    rng: &mut R,
) -> Vec<usize> {
    let point = rng.random_range(1..parent_a.len() - 1);

    let mut seen = vec![false; city_count];
    let mut child = Vec::with_capacity(parent_a.len());
    for &city in &parent_a[..point] {
        seen[city] = true;
        child.push(city);
    }
    for &city in parent_b {
        if !seen[city] {
            seen[city] = true;
            child.push(city);
        }
    }
    child.push(parent_a[0]);
    child
}

/// Swaps two distinct interior cities. Tours of fewer than four entries
/// have at most one interior city and are left alone.
fn mutate<R: Rng + ?Sized>(tour: &mut [usize], rng: &mut R) {
    if tour.len() < 4 {
        return;
    }
    let picks = index::sample(rng, tour.len() - 2, 2);
    tour.swap(picks.index(0) + 1, picks.index(1) + 1);
}

#[cfg(test)]
#[path = "genetic_tests.rs"]
mod tests;
