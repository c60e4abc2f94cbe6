//! TourForge Solver - tour searches over a TourForge map
//!
//! This crate provides:
//! - `TourSolver`, binding a map and a start city
//! - Nearest neighbor, brute force and genetic algorithm searches
//! - `SolverHandle` for stopping a search and polling its remaining time
//!   from another thread
//!
//! # Example
//!
//! ```
//! use tourforge_core::{City, Map};
//! use tourforge_solver::{SolveOutcome, TourSolver};
//!
//! let mut map = Map::new([
//!     City::new("A", 0.0, 0.0),
//!     City::new("B", 0.0, 1.0),
//!     City::new("C", 1.0, 1.0),
//!     City::new("D", 1.0, 0.0),
//! ]);
//! map.activate_all();
//!
//! let mut solver = TourSolver::new(map, "A").with_seed(1);
//! match solver.genetic_algorithm(20, 50, 0.05).unwrap() {
//!     SolveOutcome::Solved(tour) => assert_eq!(tour.path().len(), 5),
//!     SolveOutcome::Cancelled => unreachable!(),
//! }
//! ```

mod brute_force;
pub mod error;
pub mod genetic;
mod matrix;
mod nearest_neighbor;
pub mod outcome;
pub mod progress;
mod run;
pub mod solver;
pub mod stats;

pub use error::{Result, SolveError};
pub use genetic::{GeneticParams, GeneticSolver};
pub use outcome::{SolveOutcome, TourSolution};
pub use progress::{SolverHandle, SolverProgress};
pub use solver::TourSolver;
pub use stats::SolveStats;
